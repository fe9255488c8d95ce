//! Zone load/import system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;
use std::path::Path;

use crate::common::StatusLine;
use crate::config::AppConfig;
use crate::editor::ZoneEditors;
use crate::zones::error::PersistenceError;
use crate::zones::fixtures::demo_zones;

use super::messages::{ImportZonesRequest, LoadZonesRequest};
use super::resources::{AsyncZoneOperation, LoadZonesTask, ZoneLoadError, ZoneOperation};
use super::results::LoadResult;
use super::save::zones_file;
use super::snapshot::ZoneConfiguration;

/// Read a configuration file. A missing file is `Ok(None)`.
pub fn read_configuration(path: &Path) -> Result<Option<ZoneConfiguration>, PersistenceError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(PersistenceError::io(path, e)),
    };
    ZoneConfiguration::from_json(&json).map(Some)
}

/// Starts async load and import operations (file I/O and parsing only)
pub fn load_zones_system(
    mut commands: Commands,
    mut load_events: MessageReader<LoadZonesRequest>,
    mut import_events: MessageReader<ImportZonesRequest>,
    config: Res<AppConfig>,
    mut async_op: ResMut<AsyncZoneOperation>,
) {
    let zones_dir = config.data.zones_dir();
    let requests = load_events
        .read()
        .map(|e| (e.camera_id.clone(), zones_file(&zones_dir, &e.camera_id), false))
        .chain(
            import_events
                .read()
                .map(|e| (e.camera_id.clone(), e.path.clone(), true)),
        );

    for (camera_id, path, is_import) in requests {
        // A camera switch must always load, only imports wait for the pool
        if is_import && async_op.is_busy() {
            warn!("Zone operation already in progress, skipping import into camera {}", camera_id);
            continue;
        }

        async_op.begin(
            ZoneOperation::Load,
            if is_import {
                format!("Importing {}...", path.display())
            } else {
                format!("Loading zones for camera {}...", camera_id)
            },
        );

        let task = IoTaskPool::get().spawn(async move {
            let outcome = read_configuration(&path);
            LoadResult {
                camera_id,
                path,
                is_import,
                outcome,
            }
        });
        commands.spawn(LoadZonesTask(task));
    }
}

fn describe_dropped(count: usize) -> Option<String> {
    (count > 0).then(|| format!("{} invalid zone(s) were skipped", count))
}

/// Polls load tasks and installs the zones into the camera's editor
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadZonesTask)>,
    mut async_op: ResMut<AsyncZoneOperation>,
    mut editors: ResMut<ZoneEditors>,
    config: Res<AppConfig>,
    mut load_error: ResMut<ZoneLoadError>,
    mut status: ResMut<StatusLine>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        async_op.finish(ZoneOperation::Load);
        load_error.message = None;
        commands.entity(entity).despawn();

        let Some(editor) = editors.get_mut(&result.camera_id) else {
            warn!("Loaded zones for camera {} which is not open", result.camera_id);
            continue;
        };

        match result.outcome {
            Ok(Some(configuration)) if result.is_import => {
                if configuration.camera_id != result.camera_id {
                    warn!(
                        "Importing zones authored for camera {} into camera {}",
                        configuration.camera_id, result.camera_id
                    );
                }
                let dropped = editor.replace_zones(configuration.zones).len();
                match describe_dropped(dropped) {
                    Some(message) => status.error(message),
                    None => status.info(format!("Imported {}", result.path.display())),
                }
            }
            Ok(Some(configuration)) => match editor.load(configuration) {
                Ok(dropped) => {
                    if let Some(message) = describe_dropped(dropped.len()) {
                        status.error(message);
                    }
                }
                Err(e) => {
                    error!("{}", e);
                    load_error.message = Some(e.to_string());
                }
            },
            Ok(None) if result.is_import => {
                load_error.message = Some(format!("{} does not exist", result.path.display()));
            }
            Ok(None) => {
                if config.data.seed_demo_zones {
                    info!("No saved zones for camera {}, seeding demo zones", result.camera_id);
                    editor.replace_zones(demo_zones());
                } else {
                    debug!("No saved zones for camera {}", result.camera_id);
                }
            }
            Err(e) => {
                error!("Failed to load zones from {:?}: {}", result.path, e);
                load_error.message = Some(e.to_string());
            }
        }
    }
}

