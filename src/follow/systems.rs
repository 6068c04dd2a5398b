use bevy::prelude::*;

use crate::bake::BakedPath;
use crate::path::BezierCurve;

use super::{BakedPathTracer, CurveFollower};

/// System that moves every [`CurveFollower`] along its curve.
pub fn update_curve_followers(
    mut followers: Query<(&mut CurveFollower, &mut Transform)>,
    curves: Query<(&BezierCurve, &GlobalTransform)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut follower, mut transform) in &mut followers {
        if !follower.is_playing() {
            continue;
        }

        let Ok((curve, origin)) = curves.get(follower.curve) else {
            continue;
        };

        let t = follower.advance(delta);

        // Empty curves have nothing to follow.
        if let Ok(offset) = curve.evaluate(t) {
            transform.translation = origin.translation() + offset;
        }
    }
}

/// System that moves every [`BakedPathTracer`] along its baked path.
pub fn update_baked_path_tracers(
    mut tracers: Query<(&mut BakedPathTracer, &mut Transform)>,
    paths: Res<Assets<BakedPath>>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut tracer, mut transform) in &mut tracers {
        if !tracer.is_playing() {
            continue;
        }

        // Not loaded yet.
        let Some(path) = paths.get(&tracer.path) else {
            continue;
        };

        if let Ok(offset) = path.position_at_distance(tracer.travelled) {
            transform.translation = tracer.origin + offset;
        }

        tracer.advance(delta, path.total_length());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn step(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    #[test]
    fn test_follower_offsets_by_curve_origin() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_systems(Update, update_curve_followers);

        let curve = app
            .world_mut()
            .spawn((
                BezierCurve::new([Vec3::ZERO, Vec3::X * 4.0]),
                GlobalTransform::from_translation(Vec3::new(0.0, 10.0, 0.0)),
            ))
            .id();
        let follower = app
            .world_mut()
            .spawn((
                CurveFollower::new(curve).with_travel_time(2.0),
                Transform::default(),
            ))
            .id();

        step(&mut app, 0.5);

        let translation = app.world().get::<Transform>(follower).unwrap().translation;
        assert!((translation - Vec3::new(1.0, 10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_paused_follower_stays() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_systems(Update, update_curve_followers);

        let curve = app
            .world_mut()
            .spawn((
                BezierCurve::new([Vec3::ZERO, Vec3::X * 4.0]),
                GlobalTransform::IDENTITY,
            ))
            .id();
        let mut driver = CurveFollower::new(curve);
        driver.pause();
        let follower = app.world_mut().spawn((driver, Transform::default())).id();

        step(&mut app, 0.5);

        let follower = app.world().get::<CurveFollower>(follower).unwrap();
        assert_eq!(follower.elapsed, 0.0);
    }

    #[test]
    fn test_tracer_samples_then_advances() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<Assets<BakedPath>>()
            .add_systems(Update, update_baked_path_tracers);

        let curve = BezierCurve::closed([
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::Z,
        ]);
        let baked = BakedPath::bake(&curve).unwrap();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<BakedPath>>()
            .add(baked);

        let tracer = app
            .world_mut()
            .spawn((
                BakedPathTracer::new(handle)
                    .with_speed(2.0)
                    .with_origin(Vec3::Y),
                Transform::default(),
            ))
            .id();

        step(&mut app, 0.5);
        let translation = app.world().get::<Transform>(tracer).unwrap().translation;
        assert!((translation - Vec3::Y).length() < 1e-4);
        let travelled = app.world().get::<BakedPathTracer>(tracer).unwrap().travelled;
        assert!((travelled - 1.0).abs() < 1e-4);

        step(&mut app, 0.5);
        let translation = app.world().get::<Transform>(tracer).unwrap().translation;
        assert!((translation - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-4);
    }
}
