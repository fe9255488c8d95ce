//! Message types for zone persistence operations.

use bevy::prelude::*;
use std::path::PathBuf;

/// Write a camera's zones to its file in the zones directory
#[derive(Message)]
pub struct SaveZonesRequest {
    pub camera_id: String,
}

/// Read a camera's zones from its file in the zones directory
#[derive(Message)]
pub struct LoadZonesRequest {
    pub camera_id: String,
}

/// Write the active camera's zones to a user-chosen file
#[derive(Message)]
pub struct ExportZonesRequest {
    pub camera_id: String,
    pub path: PathBuf,
}

/// Replace the active camera's zones with those in a user-chosen file
#[derive(Message)]
pub struct ImportZonesRequest {
    pub camera_id: String,
    pub path: PathBuf,
}

/// POST a camera's zones to the configured deploy endpoint
#[derive(Message)]
pub struct DeployZonesRequest {
    pub camera_id: String,
}
