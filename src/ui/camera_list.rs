use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, CameraInfo};
use crate::editor::{OpenCameraRequest, ZoneEditors};
use crate::theme;

/// Branch filter for the camera list
#[derive(Resource, Default)]
pub struct CameraListState {
    /// `None` shows every branch
    pub branch: Option<String>,
}

/// Cameras belonging to the filtered branch, in config order
pub fn visible_cameras<'a>(
    cameras: &'a [CameraInfo],
    branch: Option<&str>,
) -> impl Iterator<Item = &'a CameraInfo> {
    cameras
        .iter()
        .filter(move |camera| branch.is_none_or(|b| camera.branch == b))
}

pub fn camera_list_ui(
    mut contexts: EguiContexts,
    config: Res<AppConfig>,
    editors: Res<ZoneEditors>,
    mut list_state: ResMut<CameraListState>,
    mut open_events: MessageWriter<OpenCameraRequest>,
) -> Result {
    egui::SidePanel::left("camera_list")
        .default_width(220.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Cameras").heading().size(18.0));
            ui.add_space(4.0);
            ui.separator();

            ui.horizontal_wrapped(|ui| {
                if ui
                    .selectable_label(list_state.branch.is_none(), "All")
                    .clicked()
                {
                    list_state.branch = None;
                }
                for branch in &config.data.branches {
                    let selected = list_state.branch.as_deref() == Some(branch.id.as_str());
                    if ui.selectable_label(selected, &branch.name).clicked() {
                        list_state.branch = Some(branch.id.clone());
                    }
                }
            });
            ui.separator();

            let active_id = editors.active_id();
            let mut cameras = visible_cameras(&config.data.cameras, list_state.branch.as_deref())
                .peekable();

            if cameras.peek().is_none() {
                ui.label(
                    egui::RichText::new("No cameras in this branch")
                        .color(theme::ui::HINT_TEXT)
                        .italics(),
                );
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                for camera in cameras {
                    let is_active = active_id == Some(camera.id.as_str());
                    let mut title = camera.name.clone();
                    if editors.is_dirty(&camera.id) {
                        title.push_str(" *");
                    }

                    let response = ui.selectable_label(
                        is_active,
                        egui::RichText::new(title).size(14.0),
                    );
                    if !camera.area.is_empty() {
                        ui.label(
                            egui::RichText::new(&camera.area)
                                .color(theme::ui::HINT_TEXT)
                                .size(11.0),
                        );
                    }
                    ui.add_space(2.0);

                    if response.clicked() && !is_active {
                        open_events.write(OpenCameraRequest {
                            camera_id: camera.id.clone(),
                        });
                    }
                }
            });
        });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::demo_cameras;

    #[test]
    fn test_all_branches_lists_every_camera() {
        let cameras = demo_cameras();
        assert_eq!(visible_cameras(&cameras, None).count(), cameras.len());
    }

    #[test]
    fn test_branch_filter() {
        let mut cameras = demo_cameras();
        cameras.push(CameraInfo::new("cg-1", "Bar", "Bar", "cg"));

        let cg: Vec<_> = visible_cameras(&cameras, Some("cg")).collect();
        assert_eq!(cg.len(), 1);
        assert_eq!(cg[0].id, "cg-1");

        assert_eq!(visible_cameras(&cameras, Some("d7")).count(), 0);
    }
}
