mod camera;
mod conditions;
pub mod controller;
mod double_click;
mod gizmo;
mod input;
pub mod params;
mod rendering;
pub mod session;
pub mod surface;
pub mod tools;

pub use camera::EditorCamera;
pub use controller::{EditorOutcome, ZoneEditor, ZoneEditors};
pub use session::SessionState;
pub use tools::DrawingTool;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::common::StatusLine;
use crate::config::{AppConfig, ConfigLoaded, UpdateLastCameraRequest};
use crate::zones::LoadZonesRequest;

/// Message to switch the editor to another camera
#[derive(Message)]
pub struct OpenCameraRequest {
    pub camera_id: String,
}

/// Open the camera edited last time, or the first configured one
fn open_initial_camera(config: Res<AppConfig>, mut open_events: MessageWriter<OpenCameraRequest>) {
    let camera = config
        .data
        .last_camera_id
        .as_deref()
        .and_then(|id| config.data.camera(id))
        .or_else(|| config.data.cameras.first());

    if let Some(camera) = camera {
        open_events.write(OpenCameraRequest {
            camera_id: camera.id.clone(),
        });
    }
}

fn open_camera_system(
    mut events: MessageReader<OpenCameraRequest>,
    config: Res<AppConfig>,
    mut editors: ResMut<ZoneEditors>,
    mut load_events: MessageWriter<LoadZonesRequest>,
    mut last_camera_events: MessageWriter<UpdateLastCameraRequest>,
    mut status: ResMut<StatusLine>,
) {
    for event in events.read() {
        let Some(camera) = config.data.camera(&event.camera_id) else {
            status.error(format!("Unknown camera {}", event.camera_id));
            continue;
        };

        if editors.open(camera.clone()) {
            load_events.write(LoadZonesRequest {
                camera_id: camera.id.clone(),
            });
        }
        last_camera_events.write(UpdateLastCameraRequest {
            camera_id: camera.id.clone(),
        });
        status.clear();
    }
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZoneEditors>()
            .init_resource::<double_click::ClickTracker>()
            .init_resource::<StatusLine>()
            .add_message::<OpenCameraRequest>()
            .init_gizmo_group::<gizmo::ZoneGizmoGroup>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    gizmo::configure_zone_gizmos,
                    open_initial_camera.after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    open_camera_system.run_if(on_message::<OpenCameraRequest>),
                    surface::sync_video_surface.run_if(resource_changed::<ZoneEditors>),
                    camera::camera_pan,
                    camera::camera_zoom.run_if(conditions::no_dialog_open),
                    camera::apply_camera_zoom,
                    tools::update_cursor_icon,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    tools::handle_tool_shortcuts,
                    input::handle_surface_click,
                    input::handle_editor_keys,
                )
                    .chain()
                    .run_if(conditions::has_active_editor)
                    .run_if(conditions::no_dialog_open),
            )
            .add_systems(
                Update,
                (
                    rendering::draw_surface_border,
                    rendering::draw_zones,
                    rendering::draw_draft,
                )
                    .run_if(conditions::has_active_editor),
            )
            .add_systems(EguiPrimaryContextPass, rendering::render_zone_labels);
    }
}
