//! Resource types for zone persistence state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;

use super::results::{DeployResult, LoadResult, SaveResult};

/// Resource tracking save/export errors for display to user
#[derive(Resource, Default)]
pub struct ZoneSaveError {
    pub message: Option<String>,
}

/// Resource tracking load/import errors for display to user
#[derive(Resource, Default)]
pub struct ZoneLoadError {
    pub message: Option<String>,
}

/// Resource tracking deploy errors for display to user
#[derive(Resource, Default)]
pub struct ZoneDeployError {
    pub message: Option<String>,
}

/// Kinds of background zone I/O
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneOperation {
    /// Save or export
    Save,
    /// Load or import
    Load,
    Deploy,
}

#[derive(Debug, Default)]
struct PendingOperations {
    count: usize,
    description: Option<String>,
}

/// Resource tracking async zone I/O for the busy modal.
///
/// Each kind keeps its own count of in-flight tasks, so a finished load
/// does not release a deploy that is still running.
#[derive(Resource, Default, Debug)]
pub struct AsyncZoneOperation {
    save: PendingOperations,
    load: PendingOperations,
    deploy: PendingOperations,
}

impl AsyncZoneOperation {
    fn pending_mut(&mut self, operation: ZoneOperation) -> &mut PendingOperations {
        match operation {
            ZoneOperation::Save => &mut self.save,
            ZoneOperation::Load => &mut self.load,
            ZoneOperation::Deploy => &mut self.deploy,
        }
    }

    /// Record a task of `operation` being spawned
    pub fn begin(&mut self, operation: ZoneOperation, description: impl Into<String>) {
        let pending = self.pending_mut(operation);
        pending.count += 1;
        pending.description = Some(description.into());
    }

    /// Record a task of `operation` completing. Other kinds stay busy.
    pub fn finish(&mut self, operation: ZoneOperation) {
        let pending = self.pending_mut(operation);
        pending.count = pending.count.saturating_sub(1);
        if pending.count == 0 {
            pending.description = None;
        }
    }

    pub fn is_busy(&self) -> bool {
        self.save.count > 0 || self.load.count > 0 || self.deploy.count > 0
    }

    /// What the busy modal shows: the first kind still running
    pub fn description(&self) -> Option<&str> {
        [&self.save, &self.deploy, &self.load]
            .into_iter()
            .find(|pending| pending.count > 0)
            .and_then(|pending| pending.description.as_deref())
    }
}

/// Component for save task
#[derive(Component)]
pub struct SaveZonesTask(pub Task<SaveResult>);

/// Component for load task
#[derive(Component)]
pub struct LoadZonesTask(pub Task<LoadResult>);

/// Component for deploy task
#[derive(Component)]
pub struct DeployZonesTask(pub Task<DeployResult>);
