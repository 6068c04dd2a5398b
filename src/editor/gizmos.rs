//! Curve, anchor and handle gizmo rendering.

use bevy::prelude::*;

use crate::path::{math, AnchorId, BezierCurve, HandleStyle, SelectedCurve};

use super::{AnchorPart, AnchorTarget, EditorSettings, SelectionState};

/// System to render curves as gizmo polylines.
pub fn render_curves(
    mut gizmos: Gizmos,
    settings: Res<EditorSettings>,
    curves: Query<(&BezierCurve, &GlobalTransform, Has<SelectedCurve>)>,
) {
    if !settings.show_gizmos {
        return;
    }

    for (curve, global_transform, is_selected) in &curves {
        let origin = global_transform.translation();
        let color = if is_selected {
            settings.selected_curve_color
        } else {
            settings.curve_color
        };

        for (p0, p1) in curve.edges() {
            let points = math::sample_points(p0, p1, settings.curve_resolution);
            for pair in points.windows(2) {
                gizmos.line(origin + pair[0], origin + pair[1], color);
            }
        }
    }
}

/// System to render anchors and, where the style allows, their handles.
pub fn render_anchors(
    mut gizmos: Gizmos,
    settings: Res<EditorSettings>,
    selection_state: Res<SelectionState>,
    curves: Query<(Entity, &BezierCurve, &GlobalTransform)>,
) {
    if !settings.show_gizmos {
        return;
    }

    for (entity, curve, global_transform) in &curves {
        let origin = global_transform.translation();

        let highlight = |anchor: AnchorId, part: AnchorPart| {
            let matches = |target: Option<AnchorTarget>| {
                target.is_some_and(|t| t.curve == entity && t.anchor == anchor && t.part == part)
            };
            (
                matches(selection_state.selected) || matches(selection_state.dragging),
                matches(selection_state.hovered),
            )
        };

        for anchor in curve.anchors() {
            let center = origin + anchor.position;

            if anchor.handle_style() != HandleStyle::None {
                for (part, tip) in [
                    (AnchorPart::InHandle, anchor.in_control()),
                    (AnchorPart::OutHandle, anchor.out_control()),
                ] {
                    let tip = origin + tip;
                    gizmos.line(center, tip, settings.handle_line_color);

                    let (is_selected, is_hovered) = highlight(anchor.id(), part);
                    let color = if is_selected {
                        settings.selected_color
                    } else {
                        settings.handle_color
                    };
                    let radius = if is_hovered {
                        settings.handle_radius * 1.5
                    } else {
                        settings.handle_radius
                    };
                    gizmos.sphere(Isometry3d::from_translation(tip), radius, color);
                }
            }

            let (is_selected, is_hovered) = highlight(anchor.id(), AnchorPart::Anchor);
            let color = if is_selected {
                settings.selected_color
            } else {
                settings.anchor_color
            };
            let radius = if is_hovered {
                settings.anchor_radius * 1.5
            } else {
                settings.anchor_radius
            };
            gizmos.sphere(Isometry3d::from_translation(center), radius, color);
        }
    }
}
