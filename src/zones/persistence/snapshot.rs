//! Serialized form of one camera's zones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CameraInfo;
use crate::zones::error::PersistenceError;
use crate::zones::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

/// Payload written by save/export and posted by deploy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfiguration {
    pub camera_id: String,
    /// Pixel size of the surface the zone coordinates refer to
    pub surface: SurfaceSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl ZoneConfiguration {
    pub fn new(camera: &CameraInfo, zones: Vec<Zone>) -> Self {
        Self {
            camera_id: camera.id.clone(),
            surface: SurfaceSize {
                width: camera.width,
                height: camera.height,
            },
            saved_at: None,
            zones,
        }
    }

    /// Copy stamped with the current time, ready to be written out
    pub fn stamped(mut self) -> Self {
        self.saved_at = Some(Utc::now());
        self
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }
}
