#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod service;

pub mod types;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use portside_core::{BoxedError, Error, ErrorKind, Result};
pub use service::MetadataService;
pub use types::{
    AddSourceOutcome, CreatePermissionOutcome, DataSourceConfig, DropPermissionOutcome,
    DropSourceOutcome, GatewayHealth, QualifiedTable, RunSqlRequest, SourceKind, TableConfig,
    TableSpec, TrackTableOutcome, UntrackTableOutcome,
};

/// Tracing target for metadata gateway operations.
pub const TRACING_TARGET: &str = "portside_hasura::metadata";

/// Confirmation phrase gating [`MetadataProvider::clear_metadata`].
///
/// Clearing metadata wipes every source, tracked table and permission on
/// the gateway. The phrase has to arrive from outside the process; nothing
/// in the workflow crates references it.
pub const CLEAR_METADATA_CONFIRMATION: &str =
    "I know this will clear the gateway metadata irrecoverably";

/// Core trait for gateway metadata operations.
///
/// Implementations map each remote capability to a closed outcome enum;
/// transport and protocol failures surface as errors, remote-declared
/// refusals as the `Failure` variants.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Registers a data source with the gateway.
    async fn add_source(&self, source: &DataSourceConfig) -> Result<AddSourceOutcome>;

    /// Drops a registered data source.
    async fn drop_source(&self, source: &DataSourceConfig) -> Result<DropSourceOutcome>;

    /// Tracks a table on a registered source, exposing it under its custom
    /// name and root fields.
    async fn track_table(&self, table: &TableConfig) -> Result<TrackTableOutcome>;

    /// Untracks a table, removing it from the GraphQL schema.
    async fn untrack_table(&self, table: &TableConfig) -> Result<UntrackTableOutcome>;

    /// Grants a role read access to a tracked table.
    async fn create_select_permission(
        &self,
        table: &TableConfig,
        role_id: &str,
    ) -> Result<CreatePermissionOutcome>;

    /// Revokes a role's read access to a tracked table.
    async fn drop_select_permission(
        &self,
        table: &TableConfig,
        role_id: &str,
    ) -> Result<DropPermissionOutcome>;

    /// Lists the tables of a source; `None` targets the gateway's built-in
    /// PostgreSQL source.
    async fn get_source_tables(
        &self,
        source: Option<&DataSourceConfig>,
    ) -> Result<Vec<QualifiedTable>>;

    /// Runs a batch of SQL statements as one bulk call and returns the raw
    /// gateway response.
    async fn run_sql(&self, request: &RunSqlRequest) -> Result<serde_json::Value>;

    /// Probes the gateway's health endpoint.
    async fn health_check(&self) -> Result<GatewayHealth>;

    /// Clears all gateway metadata. Destructive escape hatch; fails with a
    /// precondition error unless `confirmation` equals
    /// [`CLEAR_METADATA_CONFIRMATION`] exactly.
    async fn clear_metadata(&self, confirmation: &str) -> Result<serde_json::Value>;
}
