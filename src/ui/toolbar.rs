use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::{DrawingTool, SessionState, ZoneEditors};
use crate::theme;
use crate::zones::{
    DeployZonesRequest, ExportZonesRequest, ImportZonesRequest, SaveZonesRequest, ZoneKind,
};

/// Main toolbar: drawing tools and the active camera's file actions
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut editors: ResMut<ZoneEditors>,
    mut save_events: MessageWriter<SaveZonesRequest>,
    mut deploy_events: MessageWriter<DeployZonesRequest>,
    mut export_events: MessageWriter<ExportZonesRequest>,
    mut import_events: MessageWriter<ImportZonesRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            let Some(editor) = editors.active_mut() else {
                ui.label(
                    egui::RichText::new("Select a camera to start editing zones")
                        .color(theme::ui::HINT_TEXT),
                );
                return;
            };

            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                for tool in DrawingTool::all() {
                    let selected = editor.session().tool() == Some(*tool);
                    let button = egui::Button::new(
                        egui::RichText::new(tool.display_name()).size(14.0).strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(selected);

                    if ui.add(button).clicked() {
                        editor.set_tool(Some(*tool));
                    }
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let camera_id = editor.camera().id.clone();
                let camera_name = editor.camera().name.clone();
                let dirty = editor.is_dirty();

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Deploy").on_hover_text("Send zones to the analytics server").clicked() {
                        deploy_events.write(DeployZonesRequest {
                            camera_id: camera_id.clone(),
                        });
                    }

                    if ui.button("Import...").clicked()
                        && let Some(path) = rfd::FileDialog::new()
                            .set_title("Import Zone Configuration")
                            .add_filter("Zone configuration", &["json"])
                            .pick_file()
                    {
                        import_events.write(ImportZonesRequest {
                            camera_id: camera_id.clone(),
                            path,
                        });
                    }

                    if ui.button("Export...").clicked()
                        && let Some(path) = rfd::FileDialog::new()
                            .set_title("Export Zone Configuration")
                            .add_filter("Zone configuration", &["json"])
                            .set_file_name(format!("camera-{}-zones.json", camera_id))
                            .save_file()
                    {
                        export_events.write(ExportZonesRequest {
                            camera_id: camera_id.clone(),
                            path,
                        });
                    }

                    let save_label = if dirty { "Save *" } else { "Save" };
                    if ui.add_enabled(dirty, egui::Button::new(save_label)).clicked() {
                        save_events.write(SaveZonesRequest {
                            camera_id: camera_id.clone(),
                        });
                    }

                    ui.add_space(12.0);
                    if dirty {
                        ui.colored_label(theme::ui::UNSAVED, "●")
                            .on_hover_text("Unsaved changes");
                    }
                    ui.label(egui::RichText::new(camera_name).strong());
                });
            });
        });
    Ok(())
}

/// Secondary bar: kind picker and finish/cancel while drawing, otherwise the legend
pub fn tool_settings_ui(mut contexts: EguiContexts, mut editors: ResMut<ZoneEditors>) -> Result {
    let Some(editor) = editors.active_mut() else {
        return Ok(());
    };

    egui::TopBottomPanel::top("tool_settings")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 6))
                .fill(theme::ui::PANEL_BACKGROUND),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                let tool = editor.session().tool();
                if tool.is_some_and(|t| t.has_kind_choice()) {
                    ui.label(egui::RichText::new("Zone type:").color(theme::ui::LABEL_TEXT));
                    let current = editor.session().draft_kind();
                    egui::ComboBox::from_id_salt("draft_kind_select")
                        .selected_text(current.display_name())
                        .width(140.0)
                        .show_ui(ui, |ui| {
                            for kind in ZoneKind::polygonal() {
                                if ui
                                    .selectable_label(current == *kind, kind.display_name())
                                    .clicked()
                                {
                                    editor.set_draft_kind(*kind);
                                }
                            }
                        });
                    ui.add_space(12.0);
                }

                let state = editor.session().state();
                if state == SessionState::CollectingPolygon {
                    let can_finish = editor.session().buffer().len() >= 3;
                    if ui
                        .add_enabled(can_finish, egui::Button::new("Finish (Enter)"))
                        .clicked()
                    {
                        editor.finish();
                    }
                }
                if state.is_collecting() && !editor.session().buffer().is_empty() {
                    if ui.button("Cancel (Esc)").clicked() {
                        editor.cancel_drawing();
                    }
                    ui.add_space(12.0);
                    ui.separator();
                }

                legend_ui(ui);
            });
        });
    Ok(())
}

/// Color legend for the zone kinds
fn legend_ui(ui: &mut egui::Ui) {
    for kind in ZoneKind::all() {
        let color = theme::bevy_to_egui_opaque(kind.color());
        let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 2.0, color);
        ui.label(
            egui::RichText::new(kind.legend_caption())
                .color(theme::ui::HINT_TEXT)
                .size(11.0),
        );
        ui.add_space(6.0);
    }
}
