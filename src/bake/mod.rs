//! Baked path data for cheap per-frame traversal.
//!
//! A [`BakedPath`] is a value snapshot of a [`BezierCurve`] flattened into a
//! polyline with a precomputed distance per edge. It has no link back to the
//! curve; re-baking is an explicit action.

mod storage;

pub use storage::{atomic_write, BakedPathLoader};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::path::math::{edge_indices, sample_offsets};
use crate::path::{BezierCurve, PathError};

/// Errors raised while building, saving or loading a [`BakedPath`].
#[derive(Debug, Error)]
pub enum BakeError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("failed to access baked path file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode baked path: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to decode baked path: {0}")]
    Deserialize(#[from] ron::error::SpannedError),
    #[error("distance table has {distances} entries for {points} points (closed: {closed})")]
    Malformed {
        points: usize,
        distances: usize,
        closed: bool,
    },
}

/// Flattened polyline with one distance per edge.
///
/// `distances[i]` is the length from `points[i]` to the next point; a closed
/// path carries one extra entry for the edge back to `points[0]`.
#[derive(Asset, Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BakedPathData")]
pub struct BakedPath {
    points: Vec<Vec3>,
    distances: Vec<f32>,
    closed: bool,
    #[serde(skip)]
    total_length: f32,
}

#[derive(Deserialize)]
struct BakedPathData {
    points: Vec<Vec3>,
    distances: Vec<f32>,
    closed: bool,
}

impl TryFrom<BakedPathData> for BakedPath {
    type Error = BakeError;

    fn try_from(data: BakedPathData) -> Result<Self, Self::Error> {
        Self::from_parts(data.points, data.distances, data.closed)
    }
}

impl BakedPath {
    /// Flatten `curve` at its own `segments_per_edge` resolution.
    pub fn bake(curve: &BezierCurve) -> Result<Self, PathError> {
        let points = curve.to_polyline();
        if points.is_empty() {
            return Err(PathError::EmptyPath);
        }

        let distances = curve
            .edges()
            .flat_map(|(p0, p1)| sample_offsets(p0, p1, curve.segments_per_edge()))
            .collect();

        Ok(Self::new_unchecked(points, distances, curve.is_closed()))
    }

    /// Build from raw parts, checking the distance table matches the points.
    pub fn from_parts(
        points: Vec<Vec3>,
        distances: Vec<f32>,
        closed: bool,
    ) -> Result<Self, BakeError> {
        let expected = if closed {
            points.len()
        } else {
            points.len().saturating_sub(1)
        };
        if distances.len() != expected {
            return Err(BakeError::Malformed {
                points: points.len(),
                distances: distances.len(),
                closed,
            });
        }
        Ok(Self::new_unchecked(points, distances, closed))
    }

    fn new_unchecked(points: Vec<Vec3>, distances: Vec<f32>, closed: bool) -> Self {
        let total_length = distances.iter().sum();
        Self {
            points,
            distances,
            closed,
            total_length,
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Sum of all edge distances.
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Position after travelling `travelled` units from the first point.
    ///
    /// Distances outside `[0, total_length]` wrap around. Interpolation
    /// between baked points is always linear.
    pub fn position_at_distance(&self, travelled: f32) -> Result<Vec3, PathError> {
        let first = *self.points.first().ok_or(PathError::EmptyPath)?;
        let total = self.total_length;
        if total <= 0.0 {
            return Ok(first);
        }

        let travelled = if (0.0..=total).contains(&travelled) {
            travelled
        } else {
            travelled.rem_euclid(total)
        };
        if travelled <= 0.0 {
            return Ok(first);
        }

        let mut progress = 0.0;
        for (i, next) in edge_indices(self.points.len(), self.closed) {
            let distance = self.distances[i];
            if progress < travelled && travelled <= progress + distance {
                let t = (travelled - progress) / distance;
                return Ok(self.points[i].lerp(self.points[next], t));
            }
            progress += distance;
        }

        Ok(if self.closed {
            first
        } else {
            self.points[self.points.len() - 1]
        })
    }
}

/// Plugin that registers [`BakedPath`] as an asset loadable from `.bakedpath` files.
pub struct BakePlugin;

impl Plugin for BakePlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<BakedPath>()
            .register_type::<BakedPath>()
            .init_asset_loader::<BakedPathLoader>();
    }
}
