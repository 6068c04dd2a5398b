//! Example path editor application.
//!
//! Run with: `cargo run`

use bevy::prelude::*;
use bevy_bezier_path::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(BezierPathPlugin)
        .add_plugins(BakePlugin)
        .add_plugins(BezierEditorPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (draw_grid, show_help))
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(5.0, 6.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Straight-line path, ready for handles
    commands.spawn((
        BezierCurve::new([
            Vec3::new(-4.0, 0.0, 0.0),
            Vec3::new(-2.0, 2.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(2.0, 1.5, 0.5),
            Vec3::new(4.0, 0.0, 0.0),
        ]),
        Transform::default(),
        SelectedCurve,
    ));

    // Smooth closed loop
    let loop_anchors = [
        (Vec3::new(-2.0, 0.0, 0.0), Vec3::Z),
        (Vec3::new(0.0, 0.0, 2.0), Vec3::X),
        (Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z),
        (Vec3::new(0.0, 0.0, -2.0), Vec3::NEG_X),
    ]
    .map(|(position, tangent)| {
        AnchorPoint::with_handles(position, HandleStyle::FreeSmooth, -tangent * 1.1, tangent * 1.1)
    });
    commands.spawn((
        BezierCurve::from_anchors(loop_anchors, true),
        Transform::from_xyz(0.0, 0.0, 4.0),
    ));

    // Empty curve, seeded by the editor
    commands.spawn((BezierCurve::default(), Transform::from_xyz(0.0, 0.0, -4.0)));
}

fn draw_grid(mut gizmos: Gizmos) {
    let grid_size = 10;
    let grid_color = Color::srgba(0.3, 0.3, 0.3, 0.5);

    for i in -grid_size..=grid_size {
        let pos = i as f32;
        gizmos.line(
            Vec3::new(pos, 0.0, -grid_size as f32),
            Vec3::new(pos, 0.0, grid_size as f32),
            grid_color,
        );
        gizmos.line(
            Vec3::new(-grid_size as f32, 0.0, pos),
            Vec3::new(grid_size as f32, 0.0, pos),
            grid_color,
        );
    }
}

fn show_help(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut shown: Local<bool>,
    editor_settings: Res<EditorSettings>,
) {
    if !keyboard.just_pressed(KeyCode::KeyH) {
        return;
    }
    *shown = !*shown;

    if *shown {
        println!("\n=== Path Editor Help ===");
        println!("Editor: {}", if editor_settings.enabled { "Enabled" } else { "Disabled" });
        println!();
        println!("Controls:");
        println!("  H         - Toggle this help");
        println!("  LMB       - Select / drag anchors and handles");
        println!("  A         - Append anchor");
        println!("  X         - Delete selected anchor");
        println!("  S         - Cycle handle style");
        println!("  [ / ]     - Move selected anchor back/forward");
        println!("  + / -     - Segments per edge up/down");
        println!("  C         - Toggle closed/open");
        println!("  B         - Bake to {}", editor_settings.bake_path.display());
        println!("  Escape    - Deselect all");
        println!("========================\n");
    }
}
