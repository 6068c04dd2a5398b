//! Segment interpolation and sampling between two anchors.
//!
//! The degree of a segment is picked from which of the two facing handles are
//! populated: none gives a line, one gives a quadratic with that handle as the
//! middle control point, both give a cubic.

use bevy::prelude::*;

use super::AnchorPoint;

/// Interpolation mode of the segment between two anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Linear,
    Quadratic,
    Cubic,
}

impl SegmentKind {
    /// Classify the segment from `p0` to `p1`.
    pub fn between(p0: &AnchorPoint, p1: &AnchorPoint) -> Self {
        match (p0.out_handle() != Vec3::ZERO, p1.in_handle() != Vec3::ZERO) {
            (false, false) => Self::Linear,
            (true, true) => Self::Cubic,
            _ => Self::Quadratic,
        }
    }
}

/// Point on the segment from `p0` to `p1` at local parameter `t`.
///
/// Only the cubic case clamps `t` to `[0, 1]`; linear and quadratic segments
/// extrapolate, so callers that need strict bounds clamp first.
pub fn interpolate(p0: &AnchorPoint, p1: &AnchorPoint, t: f32) -> Vec3 {
    match SegmentKind::between(p0, p1) {
        SegmentKind::Linear => p0.position.lerp(p1.position, t),
        SegmentKind::Cubic => {
            cubic_bezier(p0.position, p0.out_control(), p1.in_control(), p1.position, t)
        }
        SegmentKind::Quadratic => {
            let control = if p0.out_handle() != Vec3::ZERO {
                p0.out_control()
            } else {
                p1.in_control()
            };
            quadratic_bezier(p0.position, control, p1.position, t)
        }
    }
}

/// Quadratic Bézier blend. Does not clamp `t`.
pub fn quadratic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let mt = 1.0 - t;

    p0 * mt * mt + p1 * 2.0 * mt * t + p2 * t * t
}

/// Cubic Bézier blend. Clamps `t` to `[0, 1]`.
pub fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    p0 * mt3 + p1 * 3.0 * mt2 * t + p2 * 3.0 * mt * t2 + p3 * t3
}

/// Polyline approximation of the segment length using `segments` steps.
///
/// A `segments` of zero is treated as one.
pub fn approximate_length(p0: &AnchorPoint, p1: &AnchorPoint, segments: usize) -> f32 {
    sample_offsets(p0, p1, segments).into_iter().sum()
}

/// Distances between consecutive samples, `segments` entries starting at `t = 1/segments`.
pub fn sample_offsets(p0: &AnchorPoint, p1: &AnchorPoint, segments: usize) -> Vec<f32> {
    let segments = segments.max(1);
    let mut offsets = Vec::with_capacity(segments);
    let mut prev = p0.position;

    for i in 1..=segments {
        let point = interpolate(p0, p1, i as f32 / segments as f32);
        offsets.push(prev.distance(point));
        prev = point;
    }

    offsets
}

/// `segments + 1` evenly spaced parameter samples, both endpoints included.
pub fn sample_points(p0: &AnchorPoint, p1: &AnchorPoint, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);

    (0..=segments)
        .map(|i| interpolate(p0, p1, i as f32 / segments as f32))
        .collect()
}

/// Index following `index` in a sequence of `count` items.
///
/// Closed sequences wrap around; open ones return `None` past the last item.
pub fn next_index(index: usize, count: usize, closed: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    if closed {
        return Some((index + 1) % count);
    }
    (index + 1 < count).then_some(index + 1)
}

/// Adjacent `(from, to)` index pairs of a sequence, in path order.
pub fn edge_indices(count: usize, closed: bool) -> impl Iterator<Item = (usize, usize)> {
    (0..count).map_while(move |i| next_index(i, count, closed).map(|next| (i, next)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::HandleStyle;

    fn broken(position: Vec3, in_handle: Vec3, out_handle: Vec3) -> AnchorPoint {
        AnchorPoint::with_handles(position, HandleStyle::Broken, in_handle, out_handle)
    }

    #[test]
    fn test_segment_kind_selection() {
        let plain = AnchorPoint::new(Vec3::ZERO);
        let with_out = broken(Vec3::ZERO, Vec3::ZERO, Vec3::X);
        let with_in = broken(Vec3::X, Vec3::NEG_X, Vec3::ZERO);

        assert_eq!(SegmentKind::between(&plain, &plain), SegmentKind::Linear);
        assert_eq!(SegmentKind::between(&with_out, &plain), SegmentKind::Quadratic);
        assert_eq!(SegmentKind::between(&plain, &with_in), SegmentKind::Quadratic);
        assert_eq!(SegmentKind::between(&with_out, &with_in), SegmentKind::Cubic);
        // Only the facing handles count.
        assert_eq!(SegmentKind::between(&with_in, &with_out), SegmentKind::Linear);
    }

    #[test]
    fn test_linear_midpoint() {
        let p0 = AnchorPoint::new(Vec3::new(0.0, 0.0, 0.0));
        let p1 = AnchorPoint::new(Vec3::new(2.0, 4.0, -6.0));
        assert_eq!(interpolate(&p0, &p1, 0.5), Vec3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn test_endpoints_for_every_kind() {
        let cases = [
            (AnchorPoint::new(Vec3::ZERO), AnchorPoint::new(Vec3::X * 3.0)),
            (
                broken(Vec3::ZERO, Vec3::ZERO, Vec3::Y),
                AnchorPoint::new(Vec3::X * 3.0),
            ),
            (
                AnchorPoint::new(Vec3::ZERO),
                broken(Vec3::X * 3.0, Vec3::Y, Vec3::ZERO),
            ),
            (
                broken(Vec3::ZERO, Vec3::ZERO, Vec3::new(1.0, 2.0, 0.0)),
                broken(Vec3::X * 3.0, Vec3::new(-1.0, 2.0, 0.0), Vec3::ZERO),
            ),
        ];

        for (p0, p1) in &cases {
            assert!((interpolate(p0, p1, 0.0) - p0.position).length() < 1e-6);
            assert!((interpolate(p0, p1, 1.0) - p1.position).length() < 1e-6);
        }
    }

    #[test]
    fn test_quadratic_uses_single_handle() {
        let p0 = broken(Vec3::ZERO, Vec3::ZERO, Vec3::new(1.0, 2.0, 0.0));
        let p1 = AnchorPoint::new(Vec3::new(2.0, 0.0, 0.0));

        // B(0.5) = 0.25 * P0 + 0.5 * P1 + 0.25 * P2
        let expected = Vec3::new(1.0, 1.0, 0.0);
        assert!((interpolate(&p0, &p1, 0.5) - expected).length() < 1e-6);
    }

    #[test]
    fn test_only_cubic_clamps() {
        let p0 = AnchorPoint::new(Vec3::ZERO);
        let p1 = AnchorPoint::new(Vec3::X);
        assert!((interpolate(&p0, &p1, 2.0) - Vec3::X * 2.0).length() < 1e-6);

        let c0 = broken(Vec3::ZERO, Vec3::ZERO, Vec3::Y);
        let c1 = broken(Vec3::X, Vec3::Y, Vec3::ZERO);
        assert!((interpolate(&c0, &c1, 2.0) - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_straight_length_is_exact() {
        let p0 = AnchorPoint::new(Vec3::ZERO);
        let p1 = AnchorPoint::new(Vec3::new(3.0, 4.0, 0.0));
        assert!((approximate_length(&p0, &p1, 30) - 5.0).abs() < 1e-4);
        assert!((approximate_length(&p0, &p1, 0) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_curved_length_grows_with_resolution() {
        let p0 = broken(Vec3::ZERO, Vec3::ZERO, Vec3::Y * 2.0);
        let p1 = broken(Vec3::X * 2.0, Vec3::Y * 2.0, Vec3::ZERO);

        let coarse = approximate_length(&p0, &p1, 2);
        let fine = approximate_length(&p0, &p1, 64);
        assert!(fine > coarse);
        assert!(fine > 2.0);
    }

    #[test]
    fn test_offsets_and_points_agree() {
        let p0 = broken(Vec3::ZERO, Vec3::ZERO, Vec3::Y);
        let p1 = AnchorPoint::new(Vec3::X * 2.0);

        let points = sample_points(&p0, &p1, 8);
        let offsets = sample_offsets(&p0, &p1, 8);
        assert_eq!(points.len(), 9);
        assert_eq!(offsets.len(), 8);

        for (i, offset) in offsets.iter().enumerate() {
            assert!((points[i].distance(points[i + 1]) - offset).abs() < 1e-6);
        }

        let total: f32 = offsets.iter().sum();
        assert!((total - approximate_length(&p0, &p1, 8)).abs() < 1e-6);
    }

    #[test]
    fn test_next_index() {
        assert_eq!(next_index(0, 3, false), Some(1));
        assert_eq!(next_index(2, 3, false), None);
        assert_eq!(next_index(2, 3, true), Some(0));
        assert_eq!(next_index(0, 1, true), Some(0));
        assert_eq!(next_index(0, 0, true), None);
    }

    #[test]
    fn test_edge_indices() {
        assert_eq!(edge_indices(3, false).collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
        assert_eq!(
            edge_indices(3, true).collect::<Vec<_>>(),
            vec![(0, 1), (1, 2), (2, 0)]
        );
        assert_eq!(edge_indices(1, false).count(), 0);
        assert_eq!(edge_indices(0, true).count(), 0);
    }
}
