//! Zone persistence: per-camera save/load, file export/import and deploy.
//!
//! All file and network I/O runs on the IO task pool against an immutable
//! [`ZoneConfiguration`] snapshot; results are polled back into the main
//! schedule.
//!
//! ## Module Structure
//!
//! - [`messages`] - Message types for zone operations
//! - [`resources`] - Error and task tracking
//! - [`results`] - Result types for async operations
//! - [`snapshot`] - The serialized configuration
//! - [`save`] - Save/export system and task polling
//! - [`load`] - Load/import system and task polling
//! - [`deploy`] - HTTP deploy system and task polling

mod deploy;
mod load;
mod messages;
mod resources;
mod results;
mod save;
mod snapshot;


pub use messages::{
    DeployZonesRequest, ExportZonesRequest, ImportZonesRequest, LoadZonesRequest,
    SaveZonesRequest,
};

pub use resources::{
    AsyncZoneOperation, ZoneDeployError, ZoneOperation, ZoneLoadError, ZoneSaveError,
};

pub use snapshot::{SurfaceSize, ZoneConfiguration};

pub use deploy::{deploy_zones_system, poll_deploy_tasks};
pub use load::{load_zones_system, poll_load_tasks};
pub use save::{poll_save_tasks, save_zones_system};
