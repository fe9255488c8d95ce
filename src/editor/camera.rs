//! Editor camera: framing the surface, middle-drag pan and cursor-anchored zoom.

use bevy::input::mouse::{AccumulatedMouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::constants::{MAX_ZOOM, MIN_ZOOM};

use super::params::is_cursor_over_ui;

#[derive(Component)]
pub struct EditorCamera;

/// Orthographic scale of the editor camera (world units per screen pixel)
#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Screen space kept free for the side and top panels when fitting the surface
const PANEL_MARGIN: Vec2 = Vec2::new(560.0, 160.0);

/// Orthographic scale that shows the whole surface inside the viewport
pub fn fit_scale(surface: Vec2, window: Vec2) -> f32 {
    let available = (window - PANEL_MARGIN).max(Vec2::splat(1.0));
    let scale = (surface.x / available.x).max(surface.y / available.y);
    scale.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Scale after one wheel event. Steps are multiplicative so zooming feels
/// the same at every level.
pub fn scaled_zoom(scale: f32, wheel: f32, unit: MouseScrollUnit) -> f32 {
    let step = match unit {
        MouseScrollUnit::Line => wheel * 0.1,
        MouseScrollUnit::Pixel => wheel * 0.001,
    };
    (scale * (1.0 - step)).clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Camera position that keeps the world point under the cursor fixed while
/// the scale changes. `cursor_offset` is the cursor's distance from the
/// viewport centre in screen pixels with y up.
pub fn zoom_anchor(camera: Vec2, cursor_offset: Vec2, old_scale: f32, new_scale: f32) -> Vec2 {
    camera + cursor_offset * (old_scale - new_scale)
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        CameraZoom::default(),
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

/// Middle mouse drag moves the view
pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<EditorCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) || motion.delta == Vec2::ZERO {
        return;
    }
    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    let delta = motion.delta * zoom.scale;
    transform.translation.x -= delta.x;
    transform.translation.y += delta.y;
}

/// Wheel zoom towards the cursor so a corner can be inspected without panning
pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<(&mut Transform, &mut CameraZoom), With<EditorCamera>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
) {
    // Scrolling a panel must not zoom the surface
    if is_cursor_over_ui(&mut contexts) {
        scroll_events.clear();
        return;
    }
    let Ok((mut transform, mut zoom)) = camera_query.single_mut() else {
        return;
    };

    let cursor_offset = window_query.single().ok().and_then(|window| {
        let cursor = window.cursor_position()?;
        let offset = cursor - window.size() / 2.0;
        Some(Vec2::new(offset.x, -offset.y))
    });

    for event in scroll_events.read() {
        let new_scale = scaled_zoom(zoom.scale, event.y, event.unit);
        if let Some(offset) = cursor_offset {
            let anchored = zoom_anchor(
                transform.translation.truncate(),
                offset,
                zoom.scale,
                new_scale,
            );
            transform.translation.x = anchored.x;
            transform.translation.y = anchored.y;
        }
        zoom.scale = new_scale;
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<EditorCamera>, Changed<CameraZoom>)>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}
