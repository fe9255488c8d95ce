//! Gizmo group for zone outlines, fills and drawing previews.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ZoneGizmoGroup;

/// Wider lines than the default group so outlines read over video frames
pub fn configure_zone_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<ZoneGizmoGroup>();
    config.line.width = 2.5;
}
