//! The camera's video surface and the mapping between world and surface space.
//!
//! Zone coordinates are surface pixels: origin at the top-left corner, y down.
//! The surface sprite is centred on the world origin with y up.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::CameraInfo;
use crate::theme;
use crate::zones::Point;

use super::camera::{fit_scale, CameraZoom, EditorCamera};
use super::controller::ZoneEditors;

/// Marker for the sprite showing the active camera's frame
#[derive(Component)]
pub struct VideoSurface {
    pub camera_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFrame {
    pub size: Vec2,
}

impl SurfaceFrame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn for_camera(camera: &CameraInfo) -> Self {
        Self::new(camera.width, camera.height)
    }

    pub fn world_to_surface(&self, world: Vec2) -> Point {
        Point::new(world.x + self.size.x / 2.0, self.size.y / 2.0 - world.y)
    }

    pub fn surface_to_world(&self, point: Point) -> Vec2 {
        Vec2::new(point.x - self.size.x / 2.0, self.size.y / 2.0 - point.y)
    }

    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.size.x).contains(&point.x) && (0.0..=self.size.y).contains(&point.y)
    }

    /// Nearest point on the surface
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(point.x.clamp(0.0, self.size.x), point.y.clamp(0.0, self.size.y))
    }
}

/// Swap the surface sprite when the active camera changes and frame it in view
pub fn sync_video_surface(
    mut commands: Commands,
    editors: Res<ZoneEditors>,
    asset_server: Res<AssetServer>,
    surfaces: Query<(Entity, &VideoSurface)>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut camera_query: Query<(&mut Transform, &mut CameraZoom), With<EditorCamera>>,
) {
    let Some(editor) = editors.active() else {
        return;
    };
    let camera = editor.camera();

    if surfaces.iter().any(|(_, s)| s.camera_id == camera.id) {
        return;
    }
    for (entity, _) in surfaces.iter() {
        commands.entity(entity).despawn();
    }

    let frame = SurfaceFrame::for_camera(camera);
    let sprite = match &camera.snapshot_path {
        Some(path) => Sprite {
            image: asset_server.load(path.clone()),
            custom_size: Some(frame.size),
            ..default()
        },
        None => Sprite::from_color(theme::SURFACE_PLACEHOLDER, frame.size),
    };

    commands.spawn((
        sprite,
        Transform::from_translation(Vec3::ZERO),
        VideoSurface {
            camera_id: camera.id.clone(),
        },
    ));
    debug!("Surface for camera {} is {}x{}", camera.id, frame.size.x, frame.size.y);

    if let Ok((mut transform, mut zoom)) = camera_query.single_mut() {
        transform.translation.x = 0.0;
        transform.translation.y = 0.0;
        if let Ok(window) = window_query.single() {
            zoom.scale = fit_scale(frame.size, window.size());
        }
    }
}
