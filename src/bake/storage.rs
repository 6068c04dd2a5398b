//! RON persistence for [`BakedPath`].
//!
//! Files are written with the write-rename pattern: data goes to
//! `{path}.tmp`, is flushed with `sync_all()`, then renamed over the final
//! path, so an interrupted bake never leaves a truncated asset behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use ron::ser::PrettyConfig;

use super::{BakeError, BakedPath};

/// Atomically writes `data` to `path`, creating parent directories as needed.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)?;

    Ok(())
}

impl BakedPath {
    /// Encode as pretty RON.
    pub fn to_ron(&self) -> Result<String, BakeError> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    /// Decode from RON, validating the distance table.
    pub fn from_ron(text: &str) -> Result<Self, BakeError> {
        Ok(ron::from_str(text)?)
    }

    /// Write to `path` as RON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BakeError> {
        let text = self.to_ron()?;
        atomic_write(path.as_ref(), text.as_bytes())?;
        Ok(())
    }

    /// Read a file written by [`BakedPath::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BakeError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron(&text)
    }
}

/// Asset loader for `.bakedpath` files.
#[derive(Default, TypePath)]
pub struct BakedPathLoader;

impl AssetLoader for BakedPathLoader {
    type Asset = BakedPath;
    type Settings = ();
    type Error = BakeError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let baked = ron::de::from_bytes::<BakedPath>(&bytes)?;
        debug!(
            "loaded baked path: {} points, length {}",
            baked.points().len(),
            baked.total_length()
        );
        Ok(baked)
    }

    fn extensions(&self) -> &[&str] {
        &["bakedpath"]
    }
}
