mod gizmos;
mod input;
mod selection;

pub use selection::{AnchorPart, AnchorTarget, SelectionState};

use std::path::PathBuf;

use bevy::{gizmos::config::GizmoConfigStore, prelude::*};

use crate::path::BezierCurve;

/// Settings for the path editor.
#[derive(Resource, Debug, Clone)]
pub struct EditorSettings {
    /// Whether the editor is enabled (responds to input).
    pub enabled: bool,
    /// Whether to show gizmos (curves, anchors and handles).
    pub show_gizmos: bool,
    /// Number of line segments per edge for rendering.
    pub curve_resolution: usize,
    /// Radius of anchor spheres.
    pub anchor_radius: f32,
    /// Radius of handle tip spheres.
    pub handle_radius: f32,
    /// Line width for curves and handle lines.
    pub line_width: f32,
    /// Color of unselected curves.
    pub curve_color: Color,
    /// Color of selected curves.
    pub selected_curve_color: Color,
    /// Color of anchors.
    pub anchor_color: Color,
    /// Color of the selected anchor or handle.
    pub selected_color: Color,
    /// Color of handle tips.
    pub handle_color: Color,
    /// Color of the line from an anchor to its handle tips.
    pub handle_line_color: Color,
    /// File written by the bake hotkey.
    pub bake_path: PathBuf,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            show_gizmos: true,
            curve_resolution: 20,
            anchor_radius: 0.1,
            handle_radius: 0.05,
            line_width: 2.0,
            curve_color: Color::srgb(0.5, 0.5, 0.5),
            selected_curve_color: Color::srgb(0.2, 0.9, 0.3),
            anchor_color: Color::WHITE,
            selected_color: Color::srgb(1.0, 0.4, 0.4),
            handle_color: Color::srgb(0.5, 0.5, 1.0),
            handle_line_color: Color::srgba(0.6, 0.6, 0.6, 0.5),
            bake_path: PathBuf::from("assets/paths/curve.bakedpath"),
        }
    }
}

impl EditorSettings {
    /// Toggle the editor on/off.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Toggle gizmo visibility.
    pub fn toggle_gizmos(&mut self) {
        self.show_gizmos = !self.show_gizmos;
    }
}

/// System to sync editor settings to gizmo config.
fn sync_gizmo_config(
    settings: Res<EditorSettings>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = settings.line_width;
}

/// Give freshly spawned empty curves two anchors to start dragging from.
fn seed_empty_curves(mut curves: Query<&mut BezierCurve, Added<BezierCurve>>) {
    for mut curve in &mut curves {
        if curve.is_empty() {
            for anchor in BezierCurve::starter().anchors() {
                curve.add(anchor.position);
            }
        }
    }
}

/// Plugin that adds interactive path editing.
///
/// This plugin requires `BezierPathPlugin` to be added first.
///
/// # Hotkeys
/// - `A`: Append an anchor to the selected curve
/// - `X`: Delete the selected anchor
/// - `C`: Toggle closed/open path
/// - `S`: Cycle the handle style of the selected anchor
/// - `[` / `]`: Move the selected anchor back / forward along the path
/// - `+` / `-`: Raise / lower the selected curve's segments per edge
/// - `B`: Bake the selected curve to [`EditorSettings::bake_path`]
/// - `Escape`: Deselect all
pub struct BezierEditorPlugin;

impl Plugin for BezierEditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorSettings>()
            .init_resource::<SelectionState>()
            .add_systems(
                Update,
                (
                    sync_gizmo_config,
                    seed_empty_curves,
                    // Gizmo rendering
                    gizmos::render_curves,
                    gizmos::render_anchors,
                    // Selection
                    selection::prune_stale_selection,
                    selection::pick_anchor_parts,
                    selection::handle_selection_click,
                    selection::handle_drag,
                    // Input
                    input::handle_hotkeys,
                ),
            );
    }
}
