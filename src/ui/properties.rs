use std::num::NonZeroU32;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::common::StatusLine;
use crate::editor::ZoneEditors;
use crate::theme;
use crate::ui::DialogState;
use crate::zones::geometry::signed_area;
use crate::zones::{Zone, ZoneEdit, ZoneId, ZoneKind};

/// Text buffer for the label field of the selected zone
#[derive(Resource, Default)]
pub struct PropertiesState {
    zone_id: Option<ZoneId>,
    label: String,
}

impl PropertiesState {
    /// Reload the buffer when the selection moves to another zone
    fn sync(&mut self, zone: &Zone) {
        if self.zone_id.as_ref() != Some(&zone.id) {
            self.zone_id = Some(zone.id.clone());
            self.label = zone.label.clone().unwrap_or_default();
        }
    }
}

/// Size readout: area in square pixels for polygons, length for lines
pub fn measurement(zone: &Zone) -> String {
    match zone.segment() {
        Some((tail, head)) => format!("Length: {:.0} px", tail.distance(head)),
        None => format!("Area: {:.0} px²", signed_area(&zone.points).abs()),
    }
}

/// Zone edits are locked while a dialog or background operation is up
fn editing_enabled(dialog_state: &DialogState) -> bool {
    !dialog_state.any_modal_open
}

pub fn properties_panel_ui(
    mut contexts: EguiContexts,
    mut editors: ResMut<ZoneEditors>,
    mut state: ResMut<PropertiesState>,
    mut status: ResMut<StatusLine>,
    dialog_state: Res<DialogState>,
) -> Result {
    let Some(editor) = editors.active_mut() else {
        return Ok(());
    };

    egui::SidePanel::right("zone_properties")
        .default_width(240.0)
        .show(contexts.ctx_mut()?, |ui| {
            // Pointer edits follow the same rule as the Delete shortcut
            ui.add_enabled_ui(editing_enabled(&dialog_state), |ui| {
                ui.add_space(4.0);
                ui.label(egui::RichText::new("Zones").heading().size(18.0));
                ui.add_space(4.0);
                ui.separator();

                let selected_id = editor.store().selected_id().cloned();
                let mut clicked = None;
                egui::ScrollArea::vertical()
                    .id_salt("zone_list")
                    .max_height(260.0)
                    .show(ui, |ui| {
                        if editor.store().is_empty() {
                            ui.label(
                                egui::RichText::new("No zones yet")
                                    .color(theme::ui::HINT_TEXT)
                                    .italics(),
                            );
                        }
                        for zone in editor.store().zones() {
                            ui.horizontal(|ui| {
                                let (rect, _) = ui
                                    .allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                                ui.painter().rect_filled(
                                    rect,
                                    2.0,
                                    theme::bevy_to_egui_opaque(zone.kind.color()),
                                );
                                let is_selected = selected_id.as_ref() == Some(&zone.id);
                                if ui
                                    .selectable_label(is_selected, zone.display_label())
                                    .clicked()
                                {
                                    clicked = Some(zone.id.clone());
                                }
                            });
                        }
                    });
                if let Some(id) = clicked {
                    editor.select(&id);
                }

                ui.add_space(8.0);
                ui.label(egui::RichText::new("Properties").heading().size(18.0));
                ui.separator();

                let Some(zone) = editor.store().selected_zone().cloned() else {
                    ui.label("No zone selected");
                    return;
                };
                state.sync(&zone);

                ui.label(
                    egui::RichText::new(format!("Id: {}", zone.id))
                        .color(theme::ui::HINT_TEXT)
                        .small(),
                );
                ui.add_space(4.0);

                let mut edit = ZoneEdit::default();

                ui.horizontal(|ui| {
                    ui.label("Type:");
                    egui::ComboBox::from_id_salt("zone_kind")
                        .selected_text(zone.kind.display_name())
                        .show_ui(ui, |ui| {
                            for kind in ZoneKind::all() {
                                // Lines and polygons cannot trade kinds
                                let enabled = kind.accepts_point_count(zone.points.len());
                                let response = ui
                                    .add_enabled_ui(enabled, |ui| {
                                        ui.selectable_label(zone.kind == *kind, kind.display_name())
                                    })
                                    .inner;
                                if response.clicked() && zone.kind != *kind {
                                    edit.kind = Some(*kind);
                                }
                            }
                        });
                });

                ui.horizontal(|ui| {
                    ui.label("Label:");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut state.label)
                            .hint_text(zone.id.as_str())
                            .desired_width(140.0),
                    );
                    if response.changed() {
                        edit.label = Some(state.label.clone());
                    }
                });

                if zone.kind.supports_capacity() {
                    ui.horizontal(|ui| {
                        ui.label("Seats:");
                        let mut seats = zone.capacity.map_or(0, NonZeroU32::get);
                        let response = ui.add(
                            egui::DragValue::new(&mut seats)
                                .range(0..=99)
                                .speed(0.1),
                        );
                        if response.changed() {
                            edit.capacity = Some(NonZeroU32::new(seats));
                        }
                    });
                }

                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("{} points", zone.points.len()))
                        .color(theme::ui::HINT_TEXT),
                );
                ui.label(egui::RichText::new(measurement(&zone)).color(theme::ui::HINT_TEXT));

                if let Err(e) = editor.update_selected(edit) {
                    status.error(e.to_string());
                }

                ui.add_space(8.0);
                ui.separator();
                if ui.button("Delete Zone (Del)").clicked()
                    && let Some(removed) = editor.remove_selected()
                {
                    status.info(format!("Deleted \"{}\"", removed.display_label()));
                }
            });
        });
    Ok(())
}
