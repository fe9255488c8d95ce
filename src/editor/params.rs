//! SystemParam bundles shared by the editor's input and rendering systems.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::camera::{CameraZoom, EditorCamera};

/// Window and editor camera, for converting between screen and world space
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<
        'w,
        's,
        (&'static Camera, &'static GlobalTransform, &'static CameraZoom),
        With<EditorCamera>,
    >,
}

impl CameraParams<'_, '_> {
    /// Cursor position in window coordinates, if the cursor is inside the window
    pub fn cursor_screen_pos(&self) -> Option<Vec2> {
        self.window.single().ok()?.cursor_position()
    }

    /// Cursor in world space, None when it is outside the window
    pub fn cursor_world_pos(&self) -> Option<Vec2> {
        let cursor_pos = self.cursor_screen_pos()?;
        let (camera, transform, _) = self.camera.single().ok()?;
        camera.viewport_to_world_2d(transform, cursor_pos).ok()
    }

    /// World units per screen pixel
    pub fn zoom_scale(&self) -> f32 {
        self.camera
            .single()
            .map(|(_, _, zoom)| zoom.scale)
            .unwrap_or(1.0)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Option<Vec2> {
        let (camera, transform, _) = self.camera.single().ok()?;
        camera.world_to_viewport(transform, world.extend(0.0)).ok()
    }
}

/// Pointer is over a panel, dialog or overlay
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// A text field has focus, so shortcuts must be ignored
pub fn is_typing_in_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
}
