//! # bevy_bezier_path
//!
//! A Bevy plugin for editable 3D Bézier paths.
//!
//! ## Features
//!
//! - Anchor-based Bézier paths whose edges are linear, quadratic or cubic
//!   depending on which adjacent handles are set
//! - Per-anchor handle styles (mirrored, broken, none) and stable anchor ids
//! - Arc-length evaluation and cached path length
//! - Baking to a flat polyline with one length per edge (RON asset)
//! - Runtime drivers for live curves and baked paths
//! - Interactive anchor and handle editing with gizmos and hotkeys
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_bezier_path::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(BezierPathPlugin)
//!         .add_plugins(BakePlugin)
//!         .add_plugins(PathFollowPlugin)
//!         .add_plugins(BezierEditorPlugin) // Optional: adds interactive editing
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn((
//!         Camera3d::default(),
//!         Transform::from_xyz(0.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
//!     ));
//!
//!     commands.spawn((
//!         BezierCurve::new([
//!             Vec3::new(-3.0, 0.0, 0.0),
//!             Vec3::new(0.0, 2.0, 0.0),
//!             Vec3::new(3.0, 0.0, 0.0),
//!         ]),
//!         Transform::default(),
//!     ));
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`BezierPathPlugin`]: Path types and reflection registration (required)
//! - [`BakePlugin`]: The `BakedPath` asset and its `.bakedpath` loader
//! - [`PathFollowPlugin`]: Move entities along curves or baked paths
//! - [`BezierEditorPlugin`]: Interactive editing with gizmos and hotkeys (optional)
//!
//! ## Disabling the Editor
//!
//! The editor can be toggled at runtime:
//!
//! ```ignore
//! fn toggle_editor(mut settings: ResMut<EditorSettings>) {
//!     settings.enabled = false;     // Disable input handling
//!     settings.show_gizmos = false; // Hide visual gizmos
//! }
//! ```

pub mod bake;
pub mod follow;
pub mod path;

#[cfg(feature = "editor")]
pub mod editor;

pub use bake::BakePlugin;
pub use follow::PathFollowPlugin;
pub use path::BezierPathPlugin;

#[cfg(feature = "editor")]
pub use editor::BezierEditorPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::bake::{BakeError, BakePlugin, BakedPath};
    pub use crate::follow::{BakedPathTracer, CurveFollower, DriverState, PathFollowPlugin};
    pub use crate::path::{
        AnchorId, AnchorPoint, BezierCurve, BezierPathPlugin, HandleStyle, PathError,
        SelectedCurve,
    };

    #[cfg(feature = "editor")]
    pub use crate::editor::{
        AnchorPart, AnchorTarget, BezierEditorPlugin, EditorSettings, SelectionState,
    };
}
