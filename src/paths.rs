//! Where Zoneforge keeps its config, zone files and logs.
//!
//! Running from a checkout (cargo run, debug builds) everything stays in the
//! working directory. Installed builds use the platform directories from
//! `dirs`. Setting `ZONEFORGE_HOME` puts everything under one directory,
//! which is how kiosk machines at the branches are provisioned.

use std::path::{Path, PathBuf};

/// Overrides every location below when set
pub const HOME_ENV: &str = "ZONEFORGE_HOME";

const APP_DIR: &str = "zoneforge";

/// Returns true when running in development mode (cargo run or debug build)
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Resolved config and data roots
#[derive(Debug, Clone, PartialEq)]
pub struct AppDirs {
    pub config: PathBuf,
    pub data: PathBuf,
}

impl AppDirs {
    /// Every location under a single root
    pub fn rooted(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            config: root.clone(),
            data: root,
        }
    }

    /// Resolve for the current process: env override, then dev mode, then
    /// platform directories. Falls back to the working directory when the
    /// platform reports none.
    pub fn resolve() -> Self {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
            return Self::rooted(home);
        }
        if is_dev_mode() {
            return Self::rooted(".");
        }

        let data = dirs::data_dir()
            .map(|p| p.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."));
        // Linux separates config from data, elsewhere both live together
        let config = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .map(|p| p.join(APP_DIR))
                .unwrap_or_else(|| data.clone())
        } else {
            data.clone()
        };
        Self { config, data }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.json")
    }

    /// Default directory for per-camera zone files
    pub fn zones_dir(&self) -> PathBuf {
        self.data.join("zones")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data.join("logs")
    }

    /// Create the config, zones and logs directories
    pub fn ensure(&self) -> std::io::Result<()> {
        for dir in [&self.config, &self.zones_dir(), &self.logs_dir()] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

pub fn config_file() -> PathBuf {
    AppDirs::resolve().config_file()
}

pub fn zones_dir() -> PathBuf {
    AppDirs::resolve().zones_dir()
}

pub fn logs_dir() -> PathBuf {
    AppDirs::resolve().logs_dir()
}

/// Called early in startup, before config is read or logs are opened
pub fn ensure_directories() -> std::io::Result<()> {
    AppDirs::resolve().ensure()
}
