//! Pointer and keyboard input routed to the active zone editor.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::common::StatusLine;
use crate::config::AppConfig;

use super::controller::{EditorOutcome, ZoneEditor, ZoneEditors};
use super::double_click::ClickTracker;
use super::params::{is_cursor_over_ui, is_typing_in_ui, CameraParams};
use super::session::SessionState;
use super::surface::SurfaceFrame;

fn report(outcome: &EditorOutcome, editor: &ZoneEditor, status: &mut StatusLine) {
    match outcome {
        EditorOutcome::Created(id) => {
            let label = editor
                .store()
                .get(id)
                .map(|zone| zone.display_label().to_string())
                .unwrap_or_else(|| id.to_string());
            status.info(format!("Created \"{}\"", label));
        }
        EditorOutcome::Rejected(e) => status.error(e.to_string()),
        EditorOutcome::Ignored | EditorOutcome::Captured | EditorOutcome::Selected(_) => {}
    }
}

/// Left click on the video surface: add a point, complete a shape or select
#[allow(clippy::too_many_arguments)]
pub fn handle_surface_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    config: Res<AppConfig>,
    mut editors: ResMut<ZoneEditors>,
    mut tracker: ResMut<ClickTracker>,
    mut status: ResMut<StatusLine>,
    camera: CameraParams,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    if is_cursor_over_ui(&mut contexts) {
        return;
    }
    let (Some(screen_pos), Some(world_pos)) = (camera.cursor_screen_pos(), camera.cursor_world_pos())
    else {
        return;
    };
    let Some(editor) = editors.active_mut() else {
        return;
    };

    let frame = SurfaceFrame::for_camera(editor.camera());
    let point = frame.world_to_surface(world_pos);
    if !frame.contains(point) {
        tracker.reset();
        return;
    }

    let is_double = tracker.register(time.elapsed_secs_f64(), screen_pos);
    let outcome = if is_double && editor.session().state() == SessionState::CollectingPolygon {
        editor.finish()
    } else {
        // Line pick distance is configured in screen pixels
        let threshold = config.data.line_hit_threshold * camera.zoom_scale();
        editor.click(point, threshold)
    };

    report(&outcome, editor, &mut status);
}

/// Enter finishes a polygon, Escape or right click drops the current shape
/// (Escape alone deselects), Delete/Backspace removes the selected zone
pub fn handle_editor_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut editors: ResMut<ZoneEditors>,
    mut tracker: ResMut<ClickTracker>,
    mut status: ResMut<StatusLine>,
    mut contexts: EguiContexts,
) {
    if is_typing_in_ui(&mut contexts) {
        return;
    }
    let Some(editor) = editors.active_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Enter) || keyboard.just_pressed(KeyCode::NumpadEnter) {
        let outcome = editor.finish();
        if outcome == EditorOutcome::Ignored
            && editor.session().state() == SessionState::CollectingPolygon
        {
            status.info("A polygon needs at least 3 points");
        }
        report(&outcome, editor, &mut status);
    }

    let right_click =
        mouse_button.just_pressed(MouseButton::Right) && !is_cursor_over_ui(&mut contexts);
    if keyboard.just_pressed(KeyCode::Escape) || right_click {
        if !editor.session().buffer().is_empty() {
            editor.cancel_drawing();
            tracker.reset();
            status.clear();
        } else if keyboard.just_pressed(KeyCode::Escape) {
            editor.clear_selection();
        }
    }

    if (keyboard.just_pressed(KeyCode::Delete) || keyboard.just_pressed(KeyCode::Backspace))
        && let Some(zone) = editor.remove_selected()
    {
        status.info(format!("Deleted \"{}\"", zone.display_label()));
    }
}
