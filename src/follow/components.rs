use bevy::prelude::*;

use crate::bake::BakedPath;

/// Playback state shared by the path drivers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum DriverState {
    /// Driver advances and writes the transform every frame.
    #[default]
    Playing,
    /// Driver is frozen in place.
    Paused,
}

/// Moves an entity along a [`BezierCurve`](crate::path::BezierCurve) by
/// evaluating it parametrically.
///
/// The curve is traversed once every `travel_time` seconds, distributed by
/// arc length. The entity's translation is set to the curve entity's
/// translation plus the evaluated offset.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component, Default)]
pub struct CurveFollower {
    /// The entity carrying the `BezierCurve`.
    pub curve: Entity,
    /// Seconds per full traversal.
    pub travel_time: f32,
    /// Seconds accumulated since the start.
    pub elapsed: f32,
    /// Current playback state.
    pub state: DriverState,
}

impl Default for CurveFollower {
    fn default() -> Self {
        Self {
            curve: Entity::PLACEHOLDER,
            travel_time: 1.0,
            elapsed: 0.0,
            state: DriverState::Playing,
        }
    }
}

impl CurveFollower {
    /// Create a new follower for the given curve entity.
    pub fn new(curve: Entity) -> Self {
        Self { curve, ..default() }
    }

    /// Set the time for one traversal.
    pub fn with_travel_time(mut self, travel_time: f32) -> Self {
        self.travel_time = travel_time;
        self
    }

    /// Curve parameter for the accumulated time, in `[0, 1)`.
    ///
    /// A non-positive `travel_time` pins the follower to the start.
    pub fn t(&self) -> f32 {
        if self.travel_time <= 0.0 {
            return 0.0;
        }
        self.elapsed.rem_euclid(self.travel_time) / self.travel_time
    }

    /// Accumulate `delta` seconds and return the new parameter.
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.elapsed += delta;
        self.t()
    }

    pub fn play(&mut self) {
        self.state = DriverState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = DriverState::Paused;
    }

    /// Return to the start of the curve.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn is_playing(&self) -> bool {
        self.state == DriverState::Playing
    }
}

/// Moves an entity along a [`BakedPath`] at constant speed.
///
/// Each frame samples the position at the travelled distance, then advances
/// the distance by `speed * delta`, wrapping around the total length.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component, Default)]
pub struct BakedPathTracer {
    /// The baked path asset to trace.
    pub path: Handle<BakedPath>,
    /// Movement speed in world units per second. Negative runs backwards.
    pub speed: f32,
    /// Distance travelled along the path, in `[0, total_length)`.
    pub travelled: f32,
    /// World position of the path's local origin.
    pub origin: Vec3,
    /// Current playback state.
    pub state: DriverState,
}

impl Default for BakedPathTracer {
    fn default() -> Self {
        Self {
            path: Handle::default(),
            speed: 1.0,
            travelled: 0.0,
            origin: Vec3::ZERO,
            state: DriverState::Playing,
        }
    }
}

impl BakedPathTracer {
    /// Create a new tracer for the given baked path.
    pub fn new(path: Handle<BakedPath>) -> Self {
        Self { path, ..default() }
    }

    /// Set the movement speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the world position the baked points are relative to.
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Advance by `speed * delta`, wrapping into `[0, total_length)`.
    pub fn advance(&mut self, delta: f32, total_length: f32) {
        if total_length <= 0.0 {
            self.travelled = 0.0;
            return;
        }
        self.travelled = (self.travelled + self.speed * delta).rem_euclid(total_length);
    }

    pub fn play(&mut self) {
        self.state = DriverState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = DriverState::Paused;
    }

    /// Return to the first point.
    pub fn reset(&mut self) {
        self.travelled = 0.0;
    }

    pub fn is_playing(&self) -> bool {
        self.state == DriverState::Playing
    }
}
