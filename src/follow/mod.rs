//! Runtime drivers that move entities along paths.
//!
//! Two flavours, matching the two ways of sampling a path:
//!
//! - [`CurveFollower`] evaluates a live [`BezierCurve`](crate::path::BezierCurve)
//!   by normalized parameter. Exact shape, but each frame walks the curve.
//! - [`BakedPathTracer`] walks a [`BakedPath`](crate::bake::BakedPath) by
//!   travelled distance. Linear between baked points, cheap per frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_bezier_path::prelude::*;
//!
//! fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     let curve = commands
//!         .spawn((
//!             BezierCurve::closed([Vec3::ZERO, Vec3::X * 4.0, Vec3::Z * 4.0]),
//!             Transform::default(),
//!         ))
//!         .id();
//!
//!     // Loops the live curve every 3 seconds.
//!     commands.spawn((Transform::default(), CurveFollower::new(curve).with_travel_time(3.0)));
//!
//!     // Runs along a baked copy at 2 units per second.
//!     commands.spawn((
//!         Transform::default(),
//!         BakedPathTracer::new(asset_server.load("paths/loop.bakedpath")).with_speed(2.0),
//!     ));
//! }
//! ```

mod components;
mod systems;

pub use components::*;
pub use systems::{update_baked_path_tracers, update_curve_followers};

use bevy::prelude::*;

/// Plugin that drives [`CurveFollower`] and [`BakedPathTracer`] entities every frame.
///
/// Tracers need [`BakePlugin`](crate::bake::BakePlugin) for their asset type.
pub struct PathFollowPlugin;

impl Plugin for PathFollowPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CurveFollower>()
            .register_type::<BakedPathTracer>()
            .register_type::<DriverState>()
            .add_systems(
                Update,
                (
                    systems::update_curve_followers,
                    systems::update_baked_path_tracers,
                ),
            );
    }
}
