pub mod error;
pub mod fixtures;
pub mod geometry;
mod kind;
pub mod persistence;
mod store;
mod zone;

pub use error::{PersistenceError, ZoneError, ZoneResult};
pub use kind::ZoneKind;
pub use persistence::{
    AsyncZoneOperation, DeployZonesRequest, ExportZonesRequest, ImportZonesRequest,
    LoadZonesRequest, SaveZonesRequest, SurfaceSize, ZoneConfiguration,
    ZoneDeployError, ZoneLoadError, ZoneOperation, ZoneSaveError,
};
pub use store::{ZoneEdit, ZoneStore};
pub use zone::{Point, Zone, ZoneId};

use bevy::prelude::*;

use crate::common::StatusLine;

pub struct ZonesPlugin;

impl Plugin for ZonesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZoneSaveError>()
            .init_resource::<ZoneLoadError>()
            .init_resource::<ZoneDeployError>()
            .init_resource::<AsyncZoneOperation>()
            .init_resource::<StatusLine>()
            .add_message::<SaveZonesRequest>()
            .add_message::<LoadZonesRequest>()
            .add_message::<ExportZonesRequest>()
            .add_message::<ImportZonesRequest>()
            .add_message::<DeployZonesRequest>()
            .add_systems(
                Update,
                (
                    persistence::save_zones_system.run_if(
                        on_message::<SaveZonesRequest>.or(on_message::<ExportZonesRequest>),
                    ),
                    persistence::load_zones_system.run_if(
                        on_message::<LoadZonesRequest>.or(on_message::<ImportZonesRequest>),
                    ),
                    persistence::deploy_zones_system.run_if(on_message::<DeployZonesRequest>),
                    persistence::poll_save_tasks,
                    persistence::poll_load_tasks,
                    persistence::poll_deploy_tasks,
                ),
            );
    }
}
