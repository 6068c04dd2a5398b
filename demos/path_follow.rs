//! Path following example.
//!
//! A live curve follower and a baked path tracer running the same loop.
//!
//! Run with: `cargo run --example path_follow`

use bevy::prelude::*;
use bevy_bezier_path::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(BezierPathPlugin)
        .add_plugins(BakePlugin)
        .add_plugins(PathFollowPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, handle_input)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut baked_paths: ResMut<Assets<BakedPath>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 15.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let anchors = [
        (Vec3::new(-8.0, 0.0, 0.0), Vec3::NEG_Z),
        (Vec3::new(0.0, 2.0, -6.0), Vec3::X),
        (Vec3::new(8.0, 0.0, 0.0), Vec3::Z),
        (Vec3::new(0.0, -2.0, 6.0), Vec3::NEG_X),
    ]
    .map(|(position, tangent)| {
        AnchorPoint::with_handles(position, HandleStyle::FreeSmooth, -tangent * 3.0, tangent * 3.0)
    });
    let curve = BezierCurve::from_anchors(anchors, true);

    let baked = match BakedPath::bake(&curve) {
        Ok(baked) => baked_paths.add(baked),
        Err(err) => {
            error!("cannot bake demo loop: {err}");
            return;
        }
    };

    let curve_entity = commands.spawn((curve, Transform::default())).id();

    let cube_mesh = meshes.add(Cuboid::new(0.8, 0.8, 0.8));
    let red_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.2, 0.2),
        ..default()
    });
    let blue_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.2, 0.9),
        ..default()
    });

    // Red cube: live curve, one loop every 6 seconds
    commands.spawn((
        Mesh3d(cube_mesh.clone()),
        MeshMaterial3d(red_material),
        Transform::default(),
        CurveFollower::new(curve_entity).with_travel_time(6.0),
    ));

    // Blue cube: baked copy at 5 units per second
    commands.spawn((
        Mesh3d(cube_mesh),
        MeshMaterial3d(blue_material),
        Transform::default(),
        BakedPathTracer::new(baked).with_speed(5.0),
    ));

    println!("\n=== Path Following Example ===");
    println!("Red cube: live curve follower");
    println!("Blue cube: baked path tracer");
    println!();
    println!("Controls:");
    println!("  Space  - Pause/Resume");
    println!("  R      - Reset");
    println!("================================\n");
}

fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut followers: Query<&mut CurveFollower>,
    mut tracers: Query<&mut BakedPathTracer>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        for mut follower in &mut followers {
            if follower.is_playing() {
                follower.pause();
            } else {
                follower.play();
            }
        }
        for mut tracer in &mut tracers {
            if tracer.is_playing() {
                tracer.pause();
            } else {
                tracer.play();
            }
        }
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        for mut follower in &mut followers {
            follower.reset();
        }
        for mut tracer in &mut tracers {
            tracer.reset();
        }
    }
}
