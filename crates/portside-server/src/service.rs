//! Shared service state for request handlers.

use portside_hasura::reqwest::{HasuraClient, HasuraConfig};
use portside_provision::{Provisioner, WarehouseConfig};
use portside_rolemap::reqwest::{RoleMapperClient, RoleMapperConfig};

use crate::Result;

/// Shared state of the HTTP surface.
///
/// Holds the workflow engine; cloning is cheap, the engine holds `Arc`'d
/// service handles internally.
#[derive(Debug, Clone)]
pub struct ServiceState {
    /// The workflow engine serving every operation.
    pub provisioner: Provisioner,
}

impl ServiceState {
    /// Creates the state around an existing workflow engine.
    pub fn new(provisioner: Provisioner) -> Self {
        Self { provisioner }
    }

    /// Builds the state from remote-service configurations.
    pub fn from_config(
        hasura: HasuraConfig,
        role_mapper: RoleMapperConfig,
        warehouse: WarehouseConfig,
    ) -> Result<Self> {
        let hasura = HasuraClient::new(hasura)?.into_service();
        let role_mapper = RoleMapperClient::new(role_mapper)?.into_service();
        Ok(Self::new(Provisioner::new(hasura, role_mapper, warehouse)))
    }
}
