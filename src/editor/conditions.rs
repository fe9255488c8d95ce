//! Run conditions gating the editor's input and rendering systems.

use bevy::prelude::*;

use crate::ui::DialogState;

use super::controller::ZoneEditors;

/// True while a camera is open in the editor
pub fn has_active_editor(editors: Res<ZoneEditors>) -> bool {
    editors.active().is_some()
}

/// False while an error, busy or quit dialog owns the pointer and keyboard
pub fn no_dialog_open(dialog_state: Res<DialogState>) -> bool {
    !dialog_state.any_modal_open
}
