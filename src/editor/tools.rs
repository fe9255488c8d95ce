use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::zones::ZoneKind;

use super::controller::ZoneEditors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingTool {
    #[default]
    Select,
    Polygon,
    Line,
    Rectangle,
}

impl DrawingTool {
    pub fn display_name(&self) -> &'static str {
        match self {
            DrawingTool::Select => "Select (V)",
            DrawingTool::Polygon => "Polygon (P)",
            DrawingTool::Line => "Line (L)",
            DrawingTool::Rectangle => "Rectangle (R)",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            DrawingTool::Select => CursorIcon::System(SystemCursorIcon::Default),
            DrawingTool::Polygon => CursorIcon::System(SystemCursorIcon::Crosshair),
            DrawingTool::Line => CursorIcon::System(SystemCursorIcon::Crosshair),
            DrawingTool::Rectangle => CursorIcon::System(SystemCursorIcon::Crosshair),
        }
    }

    pub fn all() -> &'static [DrawingTool] {
        &[
            DrawingTool::Select,
            DrawingTool::Polygon,
            DrawingTool::Line,
            DrawingTool::Rectangle,
        ]
    }

    pub fn is_drawing_tool(&self) -> bool {
        !matches!(self, DrawingTool::Select)
    }

    /// Kind given to zones completed with this tool when the operator has
    /// not picked one
    pub fn default_kind(&self) -> Option<ZoneKind> {
        match self {
            DrawingTool::Select => None,
            DrawingTool::Polygon => Some(ZoneKind::Table),
            DrawingTool::Line => Some(ZoneKind::Entrance),
            DrawingTool::Rectangle => Some(ZoneKind::Ignore),
        }
    }

    /// Whether the operator may choose the kind of the zone being drawn
    pub fn has_kind_choice(&self) -> bool {
        matches!(self, DrawingTool::Polygon | DrawingTool::Rectangle)
    }
}

pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut editors: ResMut<ZoneEditors>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let new_tool = if keyboard.just_pressed(KeyCode::KeyV) || keyboard.just_pressed(KeyCode::KeyS) {
        Some(DrawingTool::Select)
    } else if keyboard.just_pressed(KeyCode::KeyP) {
        Some(DrawingTool::Polygon)
    } else if keyboard.just_pressed(KeyCode::KeyL) {
        Some(DrawingTool::Line)
    } else if keyboard.just_pressed(KeyCode::KeyR) {
        Some(DrawingTool::Rectangle)
    } else {
        None
    };

    if let Some(tool) = new_tool
        && let Some(editor) = editors.active_mut()
    {
        editor.set_tool(Some(tool));
    }
}

pub fn update_cursor_icon(
    editors: Res<ZoneEditors>,
    mut window_query: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok((entity, _window)) = window_query.single_mut() else {
        return;
    };

    // Use default cursor over UI, tool cursor over the camera surface
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    let icon = editors
        .active()
        .and_then(|editor| editor.session().tool())
        .map(|tool| tool.cursor_icon())
        .unwrap_or(CursorIcon::System(SystemCursorIcon::Default));
    commands.entity(entity).insert(icon);
}
