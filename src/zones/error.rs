//! Error types for zone editing and persistence

use std::path::PathBuf;
use thiserror::Error;

use super::{ZoneId, ZoneKind};

/// Rejections raised by the zone store. A rejected operation leaves the store
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneError {
    #[error("{kind} zone needs {} but has {found}", .kind.point_requirement())]
    InvalidGeometry { kind: ZoneKind, found: usize },

    #[error("Zone id {0} is already in use")]
    DuplicateId(ZoneId),

    #[error("Zone {0} not found")]
    NotFound(ZoneId),

    #[error("Cannot change {from} to {to}: {to} needs {} but the zone has {points}", .to.point_requirement())]
    KindChangeRejected {
        from: ZoneKind,
        to: ZoneKind,
        points: usize,
    },

    #[error("Capacity only applies to table zones, not {0}")]
    CapacityRequiresTable(ZoneKind),
}

/// Failures while saving, loading, exporting or deploying a zone configuration
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid zone configuration: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration belongs to camera {found}, expected {expected}")]
    CameraMismatch { expected: String, found: String },

    #[error("No deploy endpoint configured")]
    DeployNotConfigured,

    #[error("Deploy failed: {0}")]
    Deploy(String),
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ZoneResult<T> = std::result::Result<T, ZoneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_geometry_message() {
        let err = ZoneError::InvalidGeometry {
            kind: ZoneKind::Entrance,
            found: 4,
        };
        assert_eq!(err.to_string(), "Entrance/exit zone needs exactly 2 points but has 4");
    }

    #[test]
    fn test_kind_change_message() {
        let err = ZoneError::KindChangeRejected {
            from: ZoneKind::Table,
            to: ZoneKind::Entrance,
            points: 4,
        };
        assert_eq!(
            err.to_string(),
            "Cannot change Table to Entrance/exit: Entrance/exit needs exactly 2 points but the zone has 4"
        );
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = PersistenceError::io(
            "zones/cam1.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("zones/cam1.json"));
    }
}
