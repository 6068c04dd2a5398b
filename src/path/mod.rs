mod anchor;
mod curve;
mod error;
pub mod math;

pub use anchor::*;
pub use curve::*;
pub use error::PathError;

use bevy::prelude::*;

/// Marker component for the curve currently being edited.
#[derive(Component, Debug, Clone, Copy, Reflect, Default)]
#[reflect(Component)]
pub struct SelectedCurve;

/// Plugin that registers the path types for reflection/serialization.
/// This plugin does NOT include editor functionality - use `BezierEditorPlugin` for that.
pub struct BezierPathPlugin;

impl Plugin for BezierPathPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AnchorId>()
            .register_type::<HandleStyle>()
            .register_type::<AnchorPoint>()
            .register_type::<BezierCurve>()
            .register_type::<SelectedCurve>();
    }
}
