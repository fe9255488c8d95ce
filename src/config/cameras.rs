//! Camera and branch descriptors handed to the editor.
//!
//! Discovery and health checks live outside this application; the editor only
//! needs each camera's identity and the pixel size of its video surface.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    pub id: String,
    pub name: String,
    /// Floor area the camera covers (main hall, VIP room, ...)
    #[serde(default)]
    pub area: String,
    pub branch: String,
    #[serde(default)]
    pub rtsp_url: String,
    /// Surface width in pixels
    #[serde(default = "default_width")]
    pub width: f32,
    /// Surface height in pixels
    #[serde(default = "default_height")]
    pub height: f32,
    /// Optional still frame drawn under the zones
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

fn default_width() -> f32 {
    DEFAULT_SURFACE_WIDTH
}

fn default_height() -> f32 {
    DEFAULT_SURFACE_HEIGHT
}

impl CameraInfo {
    pub fn new(id: &str, name: &str, area: &str, branch: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            area: area.to_string(),
            branch: branch.to_string(),
            rtsp_url: format!("rtsp://camera{}.local", id),
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            snapshot_path: None,
        }
    }
}

pub fn demo_branches() -> Vec<Branch> {
    [
        ("d1", "District 1"),
        ("d3", "District 3"),
        ("d7", "District 7"),
        ("cg", "Cau Giay"),
    ]
    .into_iter()
    .map(|(id, name)| Branch {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

pub fn demo_cameras() -> Vec<CameraInfo> {
    vec![
        CameraInfo::new("1", "Main hall - front", "Main hall", "d1"),
        CameraInfo::new("2", "Main hall - back", "Main hall", "d1"),
        CameraInfo::new("3", "VIP room", "VIP room", "d1"),
        CameraInfo::new("4", "Main entrance", "Entrance", "d1"),
    ]
}
