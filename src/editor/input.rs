use std::path::Path;

use bevy::prelude::*;

use crate::bake::{BakeError, BakedPath};
use crate::path::{AnchorId, BezierCurve, HandleStyle, PathError, SelectedCurve};

use super::{AnchorPart, AnchorTarget, EditorSettings, SelectionState};

/// System to handle keyboard shortcuts for path editing.
pub fn handle_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<EditorSettings>,
    mut selection_state: ResMut<SelectionState>,
    mut curves: Query<(Entity, &mut BezierCurve), With<SelectedCurve>>,
) {
    if !settings.enabled {
        return;
    }

    // A - Append an anchor to each selected curve
    if keyboard.just_pressed(KeyCode::KeyA) {
        for (entity, mut curve) in &mut curves {
            let anchor = append_anchor(&mut curve);
            selection_state.selected = Some(AnchorTarget {
                curve: entity,
                anchor,
                part: AnchorPart::Anchor,
            });
        }
    }

    // X - Delete the selected anchor
    if keyboard.just_pressed(KeyCode::KeyX) {
        if let Some(target) = selection_state.selected {
            if let Ok((_, mut curve)) = curves.get_mut(target.curve) {
                match delete_anchor(&mut curve, target) {
                    Ok(next) => selection_state.selected = next,
                    Err(err) => warn!("cannot delete anchor: {err}"),
                }
            }
        }
    }

    // C - Toggle closed/open
    if keyboard.just_pressed(KeyCode::KeyC) {
        for (_, mut curve) in &mut curves {
            curve.toggle_closed();
        }
    }

    // S - Cycle handle style
    if keyboard.just_pressed(KeyCode::KeyS) {
        if let Some(target) = selection_state.selected {
            if let Ok((_, mut curve)) = curves.get_mut(target.curve) {
                match cycle_handle_style(&mut curve, target) {
                    Ok(style) => debug!("anchor {} handle style: {}", target.anchor, style.name()),
                    Err(err) => warn!("cannot change handle style: {err}"),
                }
                // Handle parts vanish when the style goes back to None.
                if target.part != AnchorPart::Anchor {
                    selection_state.selected = Some(AnchorTarget {
                        part: AnchorPart::Anchor,
                        ..target
                    });
                }
            }
        }
    }

    // [ / ] - Move the selected anchor back / forward
    for (key, offset) in [(KeyCode::BracketLeft, -1), (KeyCode::BracketRight, 1)] {
        if !keyboard.just_pressed(key) {
            continue;
        }
        if let Some(target) = selection_state.selected {
            if let Ok((_, mut curve)) = curves.get_mut(target.curve) {
                match shift_anchor(&mut curve, target, offset) {
                    Ok(index) => debug!("anchor {} now at index {index}", target.anchor),
                    Err(err) => warn!("cannot move anchor: {err}"),
                }
            }
        }
    }

    // + / - - Change sampling resolution
    let step = if keyboard.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        1
    } else if keyboard.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        -1
    } else {
        0
    };
    if step != 0 {
        for (_, mut curve) in &mut curves {
            let segments = step_segments(&mut curve, step);
            info!("segments per edge: {segments}");
        }
    }

    // B - Bake the first selected curve
    if keyboard.just_pressed(KeyCode::KeyB) {
        if let Some((_, curve)) = curves.iter().next() {
            match bake_to_file(curve, &settings.bake_path) {
                Ok(baked) => info!(
                    "baked {} points ({:.2} units) to {}",
                    baked.points().len(),
                    baked.total_length(),
                    settings.bake_path.display()
                ),
                Err(err) => warn!("bake failed: {err}"),
            }
        }
    }

    // Escape - Deselect all
    if keyboard.just_pressed(KeyCode::Escape) {
        for (entity, _) in &curves {
            commands.entity(entity).remove::<SelectedCurve>();
        }
        selection_state.selected = None;
    }
}

/// Bake `curve` and write it to `path`.
pub fn bake_to_file(curve: &BezierCurve, path: &Path) -> Result<BakedPath, BakeError> {
    let baked = BakedPath::bake(curve)?;
    baked.save(path)?;
    Ok(baked)
}

/// Append an anchor past the end of the curve and return its id.
///
/// The new anchor continues the last edge. A lone anchor is extended along +X
/// and an empty curve gets the two starter anchors.
pub fn append_anchor(curve: &mut BezierCurve) -> AnchorId {
    let position = match curve.anchors() {
        [] => None,
        [only] => Some(only.position + Vec3::X),
        [.., prev, last] => Some(last.position + (last.position - prev.position)),
    };

    match position {
        Some(position) => curve.add(position).id(),
        None => {
            let mut last = None;
            for anchor in BezierCurve::starter().anchors() {
                last = Some(curve.add(anchor.position).id());
            }
            last.unwrap_or_else(|| curve.add(Vec3::ZERO).id())
        }
    }
}

/// Remove the anchor in `target` and return the anchor to select next.
pub fn delete_anchor(
    curve: &mut BezierCurve,
    target: AnchorTarget,
) -> Result<Option<AnchorTarget>, PathError> {
    let index = curve
        .find_index(target.anchor)
        .ok_or(PathError::AnchorNotFound(target.anchor))?;
    curve.remove(target.anchor)?;

    Ok(curve.get(index.saturating_sub(1)).map(|anchor| AnchorTarget {
        anchor: anchor.id(),
        part: AnchorPart::Anchor,
        ..target
    }))
}

/// Move the targeted anchor `offset` places along the path and return its new index.
///
/// Moves past either end leave the anchor where it is.
pub fn shift_anchor(
    curve: &mut BezierCurve,
    target: AnchorTarget,
    offset: isize,
) -> Result<usize, PathError> {
    let from = curve
        .find_index(target.anchor)
        .ok_or(PathError::AnchorNotFound(target.anchor))?;
    let Some(to) = from
        .checked_add_signed(offset)
        .filter(|&to| to < curve.len())
    else {
        return Ok(from);
    };
    curve.move_anchor(from, to)?;
    Ok(to)
}

/// Change the sampling resolution by `step` and return the new value.
pub fn step_segments(curve: &mut BezierCurve, step: isize) -> usize {
    let segments = curve.segments_per_edge().saturating_add_signed(step);
    curve.set_segments_per_edge(segments);
    curve.segments_per_edge()
}

/// Advance the handle style of the targeted anchor.
///
/// Leaving `None` with zero handles gives the anchor a short handle along the
/// curve so there is something to grab.
pub fn cycle_handle_style(
    curve: &mut BezierCurve,
    target: AnchorTarget,
) -> Result<HandleStyle, PathError> {
    let index = curve
        .find_index(target.anchor)
        .ok_or(PathError::AnchorNotFound(target.anchor))?;
    let direction = default_handle(curve, index);

    curve.edit_anchor(target.anchor, |anchor| {
        let style = anchor.handle_style().next();
        anchor.set_handle_style(style);
        if style != HandleStyle::None && !anchor.has_handles() {
            anchor.set_in_handle(-direction);
            anchor.set_out_handle(direction);
        }
        style
    })
}

fn default_handle(curve: &BezierCurve, index: usize) -> Vec3 {
    let anchors = curve.anchors();
    let here = anchors[index].position;
    let prev = index.checked_sub(1).map(|i| anchors[i].position);
    let next = anchors.get(index + 1).map(|anchor| anchor.position);

    let tangent = match (prev, next) {
        (Some(prev), Some(next)) => next - prev,
        (None, Some(next)) => next - here,
        (Some(prev), None) => here - prev,
        (None, None) => Vec3::X,
    };
    tangent.normalize_or(Vec3::X) * 0.3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(curve: &BezierCurve, index: usize) -> AnchorTarget {
        AnchorTarget {
            curve: Entity::PLACEHOLDER,
            anchor: curve.anchors()[index].id(),
            part: AnchorPart::Anchor,
        }
    }

    #[test]
    fn test_append_anchor() {
        let mut curve = BezierCurve::default();
        append_anchor(&mut curve);
        assert_eq!(curve.len(), 2);

        let id = append_anchor(&mut curve);
        assert_eq!(curve.last().unwrap().id(), id);
        assert_eq!(curve.last().unwrap().position, Vec3::new(0.0, 0.0, -2.0));

        let mut lone = BezierCurve::new([Vec3::Y]);
        append_anchor(&mut lone);
        assert_eq!(lone.anchors()[1].position, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_delete_selects_previous() {
        let mut curve = BezierCurve::new([Vec3::ZERO, Vec3::X, Vec3::Y]);
        let first = curve.anchors()[0].id();

        let middle = target(&curve, 1);
        let next = delete_anchor(&mut curve, middle).unwrap();
        assert_eq!(next.map(|t| t.anchor), Some(first));
        assert_eq!(curve.len(), 2);

        let head = target(&curve, 0);
        let next = delete_anchor(&mut curve, head).unwrap();
        assert_eq!(next.map(|t| t.anchor), Some(curve.anchors()[0].id()));

        let head = target(&curve, 0);
        let next = delete_anchor(&mut curve, head).unwrap();
        assert!(next.is_none());
        assert!(curve.is_empty());
    }

    #[test]
    fn test_shift_anchor() {
        let mut curve = BezierCurve::new([Vec3::ZERO, Vec3::X, Vec3::Y]);
        let first = target(&curve, 0);

        assert_eq!(shift_anchor(&mut curve, first, 1), Ok(1));
        assert_eq!(curve.find_index(first.anchor), Some(1));
        assert_eq!(shift_anchor(&mut curve, first, 1), Ok(2));

        // Already last.
        assert_eq!(shift_anchor(&mut curve, first, 1), Ok(2));
        assert_eq!(curve.anchors()[2].position, Vec3::ZERO);

        let last = target(&curve, 2);
        curve.remove(last.anchor).unwrap();
        assert_eq!(
            shift_anchor(&mut curve, last, -1),
            Err(PathError::AnchorNotFound(last.anchor))
        );
    }

    #[test]
    fn test_step_segments() {
        let mut curve = BezierCurve::starter().with_segments_per_edge(2);
        assert_eq!(step_segments(&mut curve, 1), 3);
        assert_eq!(step_segments(&mut curve, -1), 2);
        assert_eq!(step_segments(&mut curve, -1), 1);
        assert_eq!(step_segments(&mut curve, -1), 1);
    }

    #[test]
    fn test_cycle_handle_style() {
        let mut curve = BezierCurve::new([Vec3::ZERO, Vec3::X * 2.0]);
        let first = target(&curve, 0);

        assert_eq!(cycle_handle_style(&mut curve, first), Ok(HandleStyle::FreeSmooth));
        let anchor = &curve.anchors()[0];
        assert!(anchor.has_handles());
        assert_eq!(anchor.out_handle(), Vec3::X * 0.3);
        assert_eq!(anchor.in_handle(), -anchor.out_handle());

        assert_eq!(cycle_handle_style(&mut curve, first), Ok(HandleStyle::Broken));
        assert_eq!(cycle_handle_style(&mut curve, first), Ok(HandleStyle::None));
        assert!(!curve.anchors()[0].has_handles());
    }
}
