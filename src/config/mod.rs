mod cameras;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::DEFAULT_LINE_HIT_THRESHOLD;

pub use cameras::{Branch, CameraInfo, demo_branches, demo_cameras};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Branches shown as tabs in the camera list
    #[serde(default = "demo_branches")]
    pub branches: Vec<Branch>,

    /// Cameras available for zone authoring
    #[serde(default = "demo_cameras")]
    pub cameras: Vec<CameraInfo>,

    /// Where per-camera zone files are written (defaults to the data directory)
    #[serde(default)]
    pub zones_dir: Option<PathBuf>,

    /// Endpoint receiving deployed zone configurations
    #[serde(default)]
    pub deploy_url: Option<String>,

    /// Seed demo zones into cameras without a saved configuration
    #[serde(default = "default_seed_demo_zones")]
    pub seed_demo_zones: bool,

    /// Screen-space pick distance for entrance lines
    #[serde(default = "default_line_hit_threshold")]
    pub line_hit_threshold: f32,

    /// Camera opened on the previous run
    #[serde(default)]
    pub last_camera_id: Option<String>,
}

fn default_seed_demo_zones() -> bool {
    true
}

fn default_line_hit_threshold() -> f32 {
    DEFAULT_LINE_HIT_THRESHOLD
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            branches: demo_branches(),
            cameras: demo_cameras(),
            zones_dir: None,
            deploy_url: None,
            seed_demo_zones: true,
            line_hit_threshold: DEFAULT_LINE_HIT_THRESHOLD,
            last_camera_id: None,
        }
    }
}

impl AppConfigData {
    pub fn camera(&self, id: &str) -> Option<&CameraInfo> {
        self.cameras.iter().find(|c| c.id == id)
    }

    pub fn zones_dir(&self) -> PathBuf {
        self.zones_dir
            .clone()
            .unwrap_or_else(crate::paths::zones_dir)
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to remember the camera being edited
#[derive(Message)]
pub struct UpdateLastCameraRequest {
    pub camera_id: String,
}

/// Reasons the config file could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Configuration file was corrupted: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not write configuration file: {0}")]
    Write(#[source] std::io::Error),
}

fn parse_config(json: &str) -> Result<AppConfigData, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

/// Read the config file. A missing file is `Ok(None)`.
fn read_config(path: &Path) -> Result<Option<AppConfigData>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(json) => parse_config(&json).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::Read(e)),
    }
}

fn write_config(path: &Path, data: &AppConfigData) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).map_err(ConfigError::Write)
}

/// Startup system to load config from disk into the existing resource.
/// Unusable files fall back to defaults and raise the reset notification.
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    config.data = match read_config(&config.config_path) {
        Ok(Some(data)) => {
            info!("Loaded config from {:?}", config.config_path);
            data
        }
        Ok(None) => {
            info!("No config file at {:?}, using defaults", config.config_path);
            AppConfigData::default()
        }
        Err(e) => {
            warn!("{}", e);
            reset_notification.show = true;
            reset_notification.reason = Some(e.to_string());
            AppConfigData::default()
        }
    };
    config.dirty = false;

    if config.data.cameras.is_empty() {
        warn!("Config lists no cameras");
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    if events.read().last().is_none() || !config.dirty {
        return;
    }
    match write_config(&config.config_path, &config.data) {
        Ok(()) => {
            info!("Config saved to {:?}", config.config_path);
            config.dirty = false;
        }
        Err(e) => error!("{}", e),
    }
}

/// System to update the last opened camera
fn update_last_camera_system(
    mut events: MessageReader<UpdateLastCameraRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.last_camera_id.as_deref() == Some(event.camera_id.as_str()) {
            continue;
        }
        config.data.last_camera_id = Some(event.camera_id.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastCameraRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    update_last_camera_system.run_if(on_message::<UpdateLastCameraRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert_eq!(data.cameras.len(), 4);
        assert!(data.zones_dir.is_none());
        assert!(data.deploy_url.is_none());
        assert!(data.seed_demo_zones);
        assert_eq!(data.line_hit_threshold, DEFAULT_LINE_HIT_THRESHOLD);
        assert!(data.last_camera_id.is_none());
    }

    #[test]
    fn test_empty_json_falls_back_to_field_defaults() {
        let data = parse_config("{}").unwrap();
        assert_eq!(data.cameras, demo_cameras());
        assert_eq!(data.branches, demo_branches());
        assert!(data.seed_demo_zones);
        assert_eq!(data.line_hit_threshold, DEFAULT_LINE_HIT_THRESHOLD);
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            zones_dir: Some(PathBuf::from("/srv/zones")),
            deploy_url: Some("http://localhost:8000/api/zones".to_string()),
            last_camera_id: Some("3".to_string()),
            ..AppConfigData::default()
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed = parse_config(&json).unwrap();

        assert_eq!(parsed.zones_dir, data.zones_dir);
        assert_eq!(parsed.deploy_url, data.deploy_url);
        assert_eq!(parsed.last_camera_id, data.last_camera_id);
        assert_eq!(parsed.cameras, data.cameras);
    }

    #[test]
    fn test_corrupt_json_is_rejected() {
        assert!(parse_config("{ cameras: ").is_err());
    }

    #[test]
    fn test_camera_lookup() {
        let data = AppConfigData::default();
        assert_eq!(data.camera("3").map(|c| c.name.as_str()), Some("VIP room"));
        assert!(data.camera("99").is_none());
    }

    #[test]
    fn test_missing_config_file_is_not_an_error() {
        let result = read_config(Path::new("does/not/exist/config.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_config_write_then_read() {
        let dir = std::env::temp_dir().join(format!("zoneforge-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        let data = AppConfigData {
            deploy_url: Some("http://analytics.local/zones".to_string()),
            seed_demo_zones: false,
            ..AppConfigData::default()
        };
        write_config(&path, &data).unwrap();
        let loaded = read_config(&path).unwrap().unwrap();
        assert_eq!(loaded.deploy_url, data.deploy_url);
        assert!(!loaded.seed_demo_zones);

        std::fs::write(&path, "not json").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(err.to_string().starts_with("Configuration file was corrupted"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_system_flags_corrupt_file() {
        let dir = std::env::temp_dir().join(format!("zoneforge-config-sys-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ broken").unwrap();

        let mut app = App::new();
        app.insert_resource(AppConfig {
            data: AppConfigData::default(),
            config_path: path,
            dirty: true,
        })
        .init_resource::<ConfigResetNotification>()
        .add_systems(Update, load_config_system);
        app.update();

        let notification = app.world().resource::<ConfigResetNotification>();
        assert!(notification.show);
        assert!(notification.reason.is_some());
        let config = app.world().resource::<AppConfig>();
        assert!(!config.dirty);
        assert_eq!(config.data.cameras, demo_cameras());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_zones_dir_override() {
        let data = AppConfigData {
            zones_dir: Some(PathBuf::from("custom")),
            ..AppConfigData::default()
        };
        assert_eq!(data.zones_dir(), PathBuf::from("custom"));
    }
}
