mod camera_list;
mod dialogs;
mod properties;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigResetNotification;
use crate::zones::{AsyncZoneOperation, ZoneDeployError, ZoneLoadError, ZoneSaveError};

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers should check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    config_reset: Res<ConfigResetNotification>,
    unsaved_changes: Res<dialogs::UnsavedChangesDialog>,
    save_error: Res<ZoneSaveError>,
    load_error: Res<ZoneLoadError>,
    deploy_error: Res<ZoneDeployError>,
    async_op: Res<AsyncZoneOperation>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = config_reset.show
        || unsaved_changes.show_close_confirmation
        || save_error.message.is_some()
        || load_error.message.is_some()
        || deploy_error.message.is_some()
        || async_op.is_busy();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<camera_list::CameraListState>()
            .init_resource::<properties::PropertiesState>()
            .init_resource::<dialogs::UnsavedChangesDialog>()
            // Side panels must render first so top panels fit between them
            .add_systems(
                EguiPrimaryContextPass,
                (
                    camera_list::camera_list_ui,
                    properties::properties_panel_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    toolbar::toolbar_ui,
                    toolbar::tool_settings_ui,
                    dialogs::status_bar_ui,
                )
                    .chain()
                    .after(properties::properties_panel_ui),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    dialogs::drawing_hint_ui,
                    dialogs::async_operation_modal_ui,
                    dialogs::persistence_error_dialogs_ui,
                    dialogs::config_reset_notification_ui,
                    dialogs::unsaved_changes_dialog_ui,
                )
                    .after(dialogs::status_bar_ui),
            )
            .add_systems(Update, dialogs::handle_window_close)
            .add_systems(First, update_dialog_state);
    }
}
