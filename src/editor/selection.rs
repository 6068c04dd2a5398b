use bevy::{prelude::*, window::PrimaryWindow};

use crate::path::{AnchorId, AnchorPoint, BezierCurve, HandleStyle, PathError, SelectedCurve};

use super::EditorSettings;

/// Which grabbable part of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorPart {
    Anchor,
    InHandle,
    OutHandle,
}

impl AnchorPart {
    /// Local position of this part.
    pub fn position(self, anchor: &AnchorPoint) -> Vec3 {
        match self {
            Self::Anchor => anchor.position,
            Self::InHandle => anchor.in_control(),
            Self::OutHandle => anchor.out_control(),
        }
    }
}

/// A grabbable part, keyed by anchor id so it stays valid across reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorTarget {
    pub curve: Entity,
    pub anchor: AnchorId,
    pub part: AnchorPart,
}

impl AnchorTarget {
    /// Whether the target's curve still holds its anchor.
    pub fn is_live(&self, curves: &Query<&BezierCurve>) -> bool {
        curves
            .get(self.curve)
            .is_ok_and(|curve| curve.find(self.anchor).is_some())
    }
}

/// Resource tracking the current selection state.
#[derive(Resource, Default, Debug, Clone)]
pub struct SelectionState {
    /// Part under the cursor, if any.
    pub hovered: Option<AnchorTarget>,
    /// Last clicked part.
    pub selected: Option<AnchorTarget>,
    /// Part being dragged.
    pub dragging: Option<AnchorTarget>,
    /// The plane normal for drag operations (perpendicular to camera).
    pub drag_plane_normal: Vec3,
    /// The initial drag plane point (for consistent plane during drag).
    pub drag_plane_point: Vec3,
}

/// Grabbable parts of an anchor. Handles are only offered when the style allows them.
fn grabbable_parts(anchor: &AnchorPoint) -> &'static [AnchorPart] {
    if anchor.handle_style() == HandleStyle::None {
        &[AnchorPart::Anchor]
    } else {
        &[AnchorPart::Anchor, AnchorPart::InHandle, AnchorPart::OutHandle]
    }
}

/// Drop selection entries whose anchor was removed or whose curve despawned.
pub fn prune_stale_selection(
    curves: Query<&BezierCurve>,
    mut selection_state: ResMut<SelectionState>,
) {
    let state = selection_state.bypass_change_detection();
    for slot in [&mut state.hovered, &mut state.selected, &mut state.dragging] {
        if slot.is_some_and(|target| !target.is_live(&curves)) {
            *slot = None;
        }
    }
}

/// System to handle mouse picking of anchors and handles.
pub fn pick_anchor_parts(
    settings: Res<EditorSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    curves: Query<(Entity, &BezierCurve, &GlobalTransform)>,
    mut selection_state: ResMut<SelectionState>,
) {
    if !settings.enabled {
        return;
    }

    // Don't update hover state while dragging
    if selection_state.dragging.is_some() {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };

    let Some(cursor_pos) = window.cursor_position() else {
        selection_state.hovered = None;
        return;
    };

    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };

    let mut closest: Option<(AnchorTarget, f32)> = None;

    for (entity, curve, global_transform) in &curves {
        let origin = global_transform.translation();

        for anchor in curve.anchors() {
            for &part in grabbable_parts(anchor) {
                let radius = match part {
                    AnchorPart::Anchor => settings.anchor_radius,
                    _ => settings.handle_radius,
                } * 2.0;
                let center = origin + part.position(anchor);

                let Some(dist) = ray_sphere_intersect(ray.origin, ray.direction, center, radius)
                else {
                    continue;
                };

                if closest.is_none_or(|(_, best)| dist < best) {
                    let target = AnchorTarget {
                        curve: entity,
                        anchor: anchor.id(),
                        part,
                    };
                    closest = Some((target, dist));
                }
            }
        }
    }

    selection_state.hovered = closest.map(|(target, _)| target);
}

fn ray_sphere_intersect(origin: Vec3, direction: Dir3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let a = direction.dot(*direction);
    let b = 2.0 * oc.dot(*direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        None
    } else {
        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if t > 0.0 {
            Some(t)
        } else {
            None
        }
    }
}

/// System to handle selection on mouse click.
pub fn handle_selection_click(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<EditorSettings>,
    mut selection_state: ResMut<SelectionState>,
    selected_curves: Query<Entity, With<SelectedCurve>>,
) {
    if !settings.enabled {
        return;
    }

    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let shift_held = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if let Some(target) = selection_state.hovered {
        if !shift_held {
            for entity in &selected_curves {
                if entity != target.curve {
                    commands.entity(entity).remove::<SelectedCurve>();
                }
            }
        }
        commands.entity(target.curve).insert(SelectedCurve);
        selection_state.selected = Some(target);
    } else if !shift_held {
        // Clicked on nothing, clear selection
        for entity in &selected_curves {
            commands.entity(entity).remove::<SelectedCurve>();
        }
        selection_state.selected = None;
    }
}

/// System to handle dragging anchors and handles.
pub fn handle_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    settings: Res<EditorSettings>,
    mut selection_state: ResMut<SelectionState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut curves: Query<(&mut BezierCurve, &GlobalTransform)>,
) {
    if !settings.enabled {
        return;
    }

    // Start drag - capture the hovered part directly
    if mouse.just_pressed(MouseButton::Left) {
        if let Some(target) = selection_state.hovered {
            if let (Ok((_, camera_transform)), Ok((curve, global_transform))) =
                (cameras.single(), curves.get(target.curve))
            {
                if let Some(anchor) = curve.find(target.anchor) {
                    selection_state.dragging = Some(target);
                    selection_state.drag_plane_normal = camera_transform.forward().as_vec3();
                    selection_state.drag_plane_point =
                        global_transform.translation() + target.part.position(anchor);
                }
            }
        }
    }

    // End drag
    if mouse.just_released(MouseButton::Left) {
        selection_state.dragging = None;
    }

    let Some(target) = selection_state.dragging else {
        return;
    };

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };

    // Use the fixed drag plane point for consistent behavior
    let Some(world_pos) = ray_plane_intersect(
        ray.origin,
        *ray.direction,
        selection_state.drag_plane_point,
        selection_state.drag_plane_normal,
    ) else {
        return;
    };

    let Ok((mut curve, global_transform)) = curves.get_mut(target.curve) else {
        selection_state.dragging = None;
        return;
    };
    let local = world_pos - global_transform.translation();

    if let Err(err) = apply_drag(&mut curve, target, local) {
        debug!("drag stopped: {err}");
        selection_state.dragging = None;
    }
}

/// Move `target` to the local position `local`.
///
/// Handle drags are ignored while the anchor's style is `None`.
pub fn apply_drag(curve: &mut BezierCurve, target: AnchorTarget, local: Vec3) -> Result<(), PathError> {
    let anchor = curve
        .find(target.anchor)
        .ok_or(PathError::AnchorNotFound(target.anchor))?;

    if target.part == AnchorPart::Anchor {
        if anchor.position != local {
            curve.set_position(target.anchor, local)?;
        }
        return Ok(());
    }

    if anchor.handle_style() == HandleStyle::None {
        return Ok(());
    }

    let handle = local - anchor.position;
    let unchanged = match target.part {
        AnchorPart::InHandle => anchor.in_handle() == handle,
        _ => anchor.out_handle() == handle,
    };
    if unchanged {
        return Ok(());
    }

    curve.edit_anchor(target.anchor, |anchor| match target.part {
        AnchorPart::InHandle => anchor.set_in_handle(handle),
        _ => anchor.set_out_handle(handle),
    })?;
    Ok(())
}

fn ray_plane_intersect(
    ray_origin: Vec3,
    ray_direction: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Vec3> {
    let denom = plane_normal.dot(ray_direction);
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (plane_point - ray_origin).dot(plane_normal) / denom;
    if t >= 0.0 {
        Some(ray_origin + ray_direction * t)
    } else {
        None
    }
}
