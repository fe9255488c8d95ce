//! Zone save/export system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;
use std::path::{Path, PathBuf};

use crate::common::StatusLine;
use crate::config::AppConfig;
use crate::editor::ZoneEditors;
use crate::zones::error::PersistenceError;

use super::messages::{ExportZonesRequest, SaveZonesRequest};
use super::resources::{AsyncZoneOperation, SaveZonesTask, ZoneOperation, ZoneSaveError};
use super::results::SaveResult;
use super::snapshot::ZoneConfiguration;

/// File holding a camera's zones inside `dir`
pub fn zones_file(dir: &Path, camera_id: &str) -> PathBuf {
    let name: String = camera_id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    dir.join(format!("{}.json", name))
}

/// Serialize and write a configuration, creating parent directories
pub fn write_configuration(
    path: &Path,
    configuration: &ZoneConfiguration,
) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
    }
    let json = configuration.to_json()?;
    std::fs::write(path, json).map_err(|e| PersistenceError::io(path, e))
}

fn spawn_save(
    commands: &mut Commands,
    async_op: &mut AsyncZoneOperation,
    camera_id: String,
    path: PathBuf,
    configuration: ZoneConfiguration,
    revision: u64,
    is_export: bool,
) {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("zones")
        .to_string();

    async_op.begin(
        ZoneOperation::Save,
        if is_export {
            format!("Exporting {}...", file_name)
        } else {
            format!("Saving {}...", file_name)
        },
    );

    let configuration = configuration.stamped();
    let task = IoTaskPool::get().spawn(async move {
        let outcome = write_configuration(&path, &configuration);
        SaveResult {
            camera_id,
            path,
            is_export,
            revision,
            outcome,
        }
    });
    commands.spawn(SaveZonesTask(task));
}

/// Starts async save and export operations
pub fn save_zones_system(
    mut commands: Commands,
    mut save_events: MessageReader<SaveZonesRequest>,
    mut export_events: MessageReader<ExportZonesRequest>,
    editors: Res<ZoneEditors>,
    config: Res<AppConfig>,
    mut async_op: ResMut<AsyncZoneOperation>,
) {
    let zones_dir = config.data.zones_dir();
    let requests = save_events
        .read()
        .map(|e| (e.camera_id.clone(), zones_file(&zones_dir, &e.camera_id), false))
        .chain(
            export_events
                .read()
                .map(|e| (e.camera_id.clone(), e.path.clone(), true)),
        );

    for (camera_id, path, is_export) in requests {
        // Don't start a new save if one is already in progress
        if async_op.is_busy() {
            warn!("Zone operation already in progress, skipping save of camera {}", camera_id);
            continue;
        }
        let Some(editor) = editors.get(&camera_id) else {
            warn!("Save requested for unknown camera {}", camera_id);
            continue;
        };
        spawn_save(
            &mut commands,
            &mut async_op,
            camera_id,
            path,
            editor.configuration(),
            editor.revision(),
            is_export,
        );
    }
}

/// Polls save tasks and handles completion
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveZonesTask)>,
    mut async_op: ResMut<AsyncZoneOperation>,
    mut editors: ResMut<ZoneEditors>,
    mut save_error: ResMut<ZoneSaveError>,
    mut status: ResMut<StatusLine>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        async_op.finish(ZoneOperation::Save);

        match result.outcome {
            Ok(()) => {
                info!("Zones for camera {} written to {:?}", result.camera_id, result.path);
                save_error.message = None;
                if !result.is_export
                    && let Some(editor) = editors.get_mut(&result.camera_id)
                {
                    editor.mark_saved(result.revision);
                }
                if result.is_export {
                    status.info(format!("Exported to {}", result.path.display()));
                } else {
                    status.info(format!("Zones saved for camera {}", result.camera_id));
                }
            }
            Err(e) => {
                error!("Failed to save zones for camera {}: {}", result.camera_id, e);
                save_error.message = Some(e.to_string());
            }
        }

        commands.entity(entity).despawn();
    }
}
