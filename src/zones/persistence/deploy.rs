//! Pushing a camera's zones to the analytics backend.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::common::StatusLine;
use crate::config::AppConfig;
use crate::editor::ZoneEditors;
use crate::zones::error::PersistenceError;

use super::messages::DeployZonesRequest;
use super::resources::{AsyncZoneOperation, DeployZonesTask, ZoneDeployError, ZoneOperation};
use super::results::DeployResult;
use super::snapshot::ZoneConfiguration;

/// POST the configuration as JSON to `url`
pub fn post_configuration(
    url: &str,
    configuration: &ZoneConfiguration,
) -> Result<(), PersistenceError> {
    let body = serde_json::to_value(configuration)?;
    match ureq::post(url)
        .set("User-Agent", "zoneforge-deploy")
        .send_json(body)
    {
        Ok(_) => Ok(()),
        Err(ureq::Error::Status(code, response)) => Err(PersistenceError::Deploy(format!(
            "server returned {} {}",
            code,
            response.status_text()
        ))),
        Err(e) => Err(PersistenceError::Deploy(e.to_string())),
    }
}

/// Starts async deploy operations
pub fn deploy_zones_system(
    mut commands: Commands,
    mut events: MessageReader<DeployZonesRequest>,
    editors: Res<ZoneEditors>,
    config: Res<AppConfig>,
    mut async_op: ResMut<AsyncZoneOperation>,
    mut deploy_error: ResMut<ZoneDeployError>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Zone operation already in progress, skipping deploy");
            continue;
        }
        let Some(url) = config.data.deploy_url.clone() else {
            deploy_error.message = Some(PersistenceError::DeployNotConfigured.to_string());
            continue;
        };
        let Some(editor) = editors.get(&event.camera_id) else {
            warn!("Deploy requested for unknown camera {}", event.camera_id);
            continue;
        };

        let configuration = editor.configuration().stamped();
        let camera_id = event.camera_id.clone();
        let zone_count = configuration.zones.len();

        async_op.begin(
            ZoneOperation::Deploy,
            format!("Deploying camera {}...", camera_id),
        );

        info!("Deploying {} zones for camera {} to {}", zone_count, camera_id, url);
        let task = IoTaskPool::get().spawn(async move {
            let outcome = post_configuration(&url, &configuration);
            DeployResult {
                camera_id,
                zone_count,
                outcome,
            }
        });
        commands.spawn(DeployZonesTask(task));
    }
}

/// Polls deploy tasks and reports the outcome
pub fn poll_deploy_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut DeployZonesTask)>,
    mut async_op: ResMut<AsyncZoneOperation>,
    mut deploy_error: ResMut<ZoneDeployError>,
    mut status: ResMut<StatusLine>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        async_op.finish(ZoneOperation::Deploy);

        match result.outcome {
            Ok(()) => {
                info!("Deployed zones for camera {}", result.camera_id);
                deploy_error.message = None;
                status.info(format!(
                    "Deployed {} zone(s) for camera {}",
                    result.zone_count, result.camera_id
                ));
            }
            Err(e) => {
                error!("Deploy of camera {} failed: {}", result.camera_id, e);
                deploy_error.message = Some(e.to_string());
            }
        }

        commands.entity(entity).despawn();
    }
}
