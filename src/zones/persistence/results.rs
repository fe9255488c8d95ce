//! Result types for async zone operations.

use std::path::PathBuf;

use crate::zones::error::PersistenceError;

use super::snapshot::ZoneConfiguration;

/// Result of an async save or export
pub struct SaveResult {
    pub camera_id: String,
    pub path: PathBuf,
    /// Export writes do not clear the camera's dirty flag
    pub is_export: bool,
    /// Editor revision the written zones were taken at
    pub revision: u64,
    pub outcome: Result<(), PersistenceError>,
}

/// Result of an async load or import.
///
/// `Ok(None)` means the camera has no saved file yet.
pub struct LoadResult {
    pub camera_id: String,
    pub path: PathBuf,
    pub is_import: bool,
    pub outcome: Result<Option<ZoneConfiguration>, PersistenceError>,
}

/// Result of an async deploy
pub struct DeployResult {
    pub camera_id: String,
    pub zone_count: usize,
    pub outcome: Result<(), PersistenceError>,
}
