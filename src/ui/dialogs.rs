//! Modal dialogs, the busy modal, the drawing hint overlay and the status bar.

use bevy::prelude::*;
use bevy::window::WindowCloseRequested;
use bevy_egui::{egui, EguiContexts};

use crate::common::StatusLine;
use crate::config::ConfigResetNotification;
use crate::editor::{SessionState, ZoneEditors};
use crate::theme;
use crate::zones::{AsyncZoneOperation, ZoneDeployError, ZoneLoadError, ZoneSaveError};

/// Quit confirmation shown when a camera has unsaved zones
#[derive(Resource, Default)]
pub struct UnsavedChangesDialog {
    pub show_close_confirmation: bool,
}

/// Intercept window close so unsaved zones are not lost silently
pub fn handle_window_close(
    mut close_events: MessageReader<WindowCloseRequested>,
    editors: Res<ZoneEditors>,
    mut dialog: ResMut<UnsavedChangesDialog>,
    mut exit: MessageWriter<AppExit>,
) {
    if close_events.read().last().is_none() {
        return;
    }
    if editors.any_dirty() {
        dialog.show_close_confirmation = true;
    } else {
        exit.write(AppExit::Success);
    }
}

pub fn unsaved_changes_dialog_ui(
    mut contexts: EguiContexts,
    mut dialog: ResMut<UnsavedChangesDialog>,
    mut exit: MessageWriter<AppExit>,
) -> Result {
    if !dialog.show_close_confirmation {
        return Ok(());
    }

    egui::Window::new("Unsaved Changes")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Some cameras have zone changes that were not saved.");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Quit Without Saving").clicked() {
                    exit.write(AppExit::Success);
                }
                if ui.button("Cancel").clicked() {
                    dialog.show_close_confirmation = false;
                }
            });
        });
    Ok(())
}

/// Instruction shown over the surface while a shape is being drawn
pub fn drawing_hint(state: SessionState, points: usize) -> Option<&'static str> {
    match state {
        SessionState::CollectingPolygon if points < 3 => Some("Click to add points."),
        SessionState::CollectingPolygon => {
            Some("Click to add points. Double-click or Enter to finish.")
        }
        SessionState::CollectingRectangle if points == 0 => Some("Click the first corner."),
        SessionState::CollectingRectangle => Some("Click the opposite corner."),
        SessionState::CollectingLine if points == 0 => Some("Click where people enter from."),
        SessionState::CollectingLine => Some("Click the direction of entry."),
        SessionState::Idle | SessionState::Selecting => None,
    }
}

fn error_window(ctx: &egui::Context, title: &str, heading: &str, message: &str) -> bool {
    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(theme::ui::ERROR_TEXT, heading);
            ui.add_space(8.0);
            egui::ScrollArea::vertical()
                .max_height(150.0)
                .show(ui, |ui| {
                    ui.label(message);
                });
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}

pub fn persistence_error_dialogs_ui(
    mut contexts: EguiContexts,
    mut save_error: ResMut<ZoneSaveError>,
    mut load_error: ResMut<ZoneLoadError>,
    mut deploy_error: ResMut<ZoneDeployError>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    if let Some(message) = save_error.message.clone()
        && error_window(ctx, "Save Error", "Failed to save zones", &message)
    {
        save_error.message = None;
    }

    if let Some(message) = load_error.message.clone()
        && error_window(ctx, "Load Error", "Failed to load zones", &message)
    {
        load_error.message = None;
    }

    if let Some(message) = deploy_error.message.clone()
        && error_window(ctx, "Deploy Error", "Failed to deploy zones", &message)
    {
        deploy_error.message = None;
    }

    Ok(())
}

pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("The configuration file could not be read and defaults are in use.");
            if let Some(reason) = &notification.reason {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(reason).color(theme::ui::HINT_TEXT).small());
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });
    Ok(())
}

/// Non-dismissable modal while a save, load or deploy is in flight
pub fn async_operation_modal_ui(
    mut contexts: EguiContexts,
    async_op: Res<AsyncZoneOperation>,
) -> Result {
    if !async_op.is_busy() {
        return Ok(());
    }

    let description = async_op.description().unwrap_or("Working...");

    egui::Window::new("Please Wait")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(description);
            });
        });
    Ok(())
}

pub fn drawing_hint_ui(mut contexts: EguiContexts, editors: Res<ZoneEditors>) -> Result {
    let Some(editor) = editors.active() else {
        return Ok(());
    };
    let session = editor.session();
    let Some(hint) = drawing_hint(session.state(), session.buffer().len()) else {
        return Ok(());
    };

    egui::Area::new(egui::Id::new("drawing_hint"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -48.0])
        .interactable(false)
        .order(egui::Order::Foreground)
        .show(contexts.ctx_mut()?, |ui| {
            egui::Frame::new()
                .fill(theme::ui::HINT_BACKGROUND)
                .inner_margin(egui::Margin::symmetric(10, 6))
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(hint).color(egui::Color32::WHITE));
                });
        });
    Ok(())
}

/// Bottom bar with the latest outcome and the zone count
pub fn status_bar_ui(
    mut contexts: EguiContexts,
    status: Res<StatusLine>,
    editors: Res<ZoneEditors>,
) -> Result {
    egui::TopBottomPanel::bottom("status_bar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 4)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                if let Some(message) = status.message() {
                    let color = if status.is_error() {
                        theme::ui::ERROR_TEXT
                    } else {
                        theme::ui::LABEL_TEXT
                    };
                    ui.colored_label(color, message);
                }

                if let Some(editor) = editors.active() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let count = editor.store().len();
                        ui.label(
                            egui::RichText::new(format!(
                                "{} zone{}",
                                count,
                                if count == 1 { "" } else { "s" }
                            ))
                            .color(theme::ui::HINT_TEXT),
                        );
                    });
                }
            });
        });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hint_when_not_drawing() {
        assert!(drawing_hint(SessionState::Idle, 0).is_none());
        assert!(drawing_hint(SessionState::Selecting, 0).is_none());
    }

    #[test]
    fn test_polygon_hint_mentions_finish_once_closable() {
        let early = drawing_hint(SessionState::CollectingPolygon, 2).unwrap_or_default();
        assert!(!early.contains("Enter"));

        let ready = drawing_hint(SessionState::CollectingPolygon, 3).unwrap_or_default();
        assert!(ready.contains("Double-click"));
        assert!(ready.contains("Enter"));
    }

    #[test]
    fn test_two_click_tools_prompt_for_second_point() {
        assert_ne!(
            drawing_hint(SessionState::CollectingRectangle, 0),
            drawing_hint(SessionState::CollectingRectangle, 1)
        );
        assert_ne!(
            drawing_hint(SessionState::CollectingLine, 0),
            drawing_hint(SessionState::CollectingLine, 1)
        );
    }
}
