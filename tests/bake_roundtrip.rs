use std::fs;

use bevy::prelude::*;
use bevy_bezier_path::prelude::*;

#[test]
fn baked_file_samples_like_the_curve() {
    let dir = std::env::temp_dir().join("bezier_path_bake_roundtrip");
    let _ = fs::remove_dir_all(&dir);
    let file = dir.join("paths/square.bakedpath");

    let curve = BezierCurve::closed([
        Vec3::ZERO,
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 2.0),
        Vec3::new(0.0, 0.0, 2.0),
    ])
    .with_segments_per_edge(8);

    BakedPath::bake(&curve).unwrap().save(&file).unwrap();
    let loaded = BakedPath::load(&file).unwrap();

    assert!(loaded.is_closed());
    assert!((loaded.total_length() - curve.length()).abs() < 1e-4);
    assert_eq!(loaded.points().len(), loaded.distances().len());

    // Straight edges, so the polyline and the curve agree everywhere.
    for step in 0..8 {
        let t = step as f32 / 8.0;
        let expected = curve.evaluate(t).unwrap();
        let sampled = loaded.position_at_distance(t * loaded.total_length()).unwrap();
        assert!(
            (expected - sampled).length() < 1e-3,
            "t = {t}: {expected} vs {sampled}"
        );
    }

    // Wraps past the end of a closed path.
    let wrapped = loaded
        .position_at_distance(loaded.total_length() + 1.0)
        .unwrap();
    assert!((wrapped - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-3);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn empty_curve_cannot_be_baked() {
    assert_eq!(
        BakedPath::bake(&BezierCurve::default()),
        Err(PathError::EmptyPath)
    );
    assert_eq!(
        BezierCurve::default().evaluate(0.5),
        Err(PathError::EmptyPath)
    );
}
