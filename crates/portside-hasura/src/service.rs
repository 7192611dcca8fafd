//! Metadata service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::types::{
    AddSourceOutcome, CreatePermissionOutcome, DataSourceConfig, DropPermissionOutcome,
    DropSourceOutcome, GatewayHealth, QualifiedTable, RunSqlRequest, TableConfig,
    TrackTableOutcome, UntrackTableOutcome,
};
use crate::{MetadataProvider, Result, TRACING_TARGET};

/// Metadata service wrapper with observability.
///
/// This wrapper adds structured logging to any metadata provider
/// implementation. The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct MetadataService {
    inner: Arc<dyn MetadataProvider>,
}

impl fmt::Debug for MetadataService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataService").finish_non_exhaustive()
    }
}

impl MetadataService {
    /// Create a new metadata service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: MetadataProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Registers a data source with the gateway.
    pub async fn add_source(&self, source: &DataSourceConfig) -> Result<AddSourceOutcome> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            source_name = %source.name,
            source_kind = %source.kind,
            "Adding data source"
        );

        let result = self.inner.add_source(source).await;
        self.log_outcome("add_source", &result, started_at);
        result
    }

    /// Drops a registered data source.
    pub async fn drop_source(&self, source: &DataSourceConfig) -> Result<DropSourceOutcome> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            source_name = %source.name,
            source_kind = %source.kind,
            "Dropping data source"
        );

        let result = self.inner.drop_source(source).await;
        self.log_outcome("drop_source", &result, started_at);
        result
    }

    /// Tracks a table on a registered source.
    pub async fn track_table(&self, table: &TableConfig) -> Result<TrackTableOutcome> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            source_name = %table.source_name,
            table = %table.source_table.table_name,
            custom_table_name = %table.custom_table_name,
            "Tracking table"
        );

        let result = self.inner.track_table(table).await;
        self.log_outcome("track_table", &result, started_at);
        result
    }

    /// Untracks a table.
    pub async fn untrack_table(&self, table: &TableConfig) -> Result<UntrackTableOutcome> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            source_name = %table.source_name,
            table = %table.source_table.table_name,
            "Untracking table"
        );

        let result = self.inner.untrack_table(table).await;
        self.log_outcome("untrack_table", &result, started_at);
        result
    }

    /// Grants a role read access to a tracked table.
    pub async fn create_select_permission(
        &self,
        table: &TableConfig,
        role_id: &str,
    ) -> Result<CreatePermissionOutcome> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            table = %table.source_table.table_name,
            role_id = %role_id,
            "Creating select permission"
        );

        let result = self.inner.create_select_permission(table, role_id).await;
        self.log_outcome("create_select_permission", &result, started_at);
        result
    }

    /// Revokes a role's read access to a tracked table.
    pub async fn drop_select_permission(
        &self,
        table: &TableConfig,
        role_id: &str,
    ) -> Result<DropPermissionOutcome> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            table = %table.source_table.table_name,
            role_id = %role_id,
            "Dropping select permission"
        );

        let result = self.inner.drop_select_permission(table, role_id).await;
        self.log_outcome("drop_select_permission", &result, started_at);
        result
    }

    /// Lists the tables of a source.
    pub async fn get_source_tables(
        &self,
        source: Option<&DataSourceConfig>,
    ) -> Result<Vec<QualifiedTable>> {
        tracing::debug!(
            target: TRACING_TARGET,
            source_name = source.map(|s| s.name.as_str()).unwrap_or("default"),
            "Listing source tables"
        );

        self.inner.get_source_tables(source).await
    }

    /// Runs a batch of SQL statements as one bulk call.
    pub async fn run_sql(&self, request: &RunSqlRequest) -> Result<Value> {
        tracing::debug!(
            target: TRACING_TARGET,
            statements = request.statements.len(),
            cascade = request.cascade,
            "Running SQL batch"
        );

        self.inner.run_sql(request).await
    }

    /// Probes the gateway's health endpoint.
    pub async fn health_check(&self) -> Result<GatewayHealth> {
        self.inner.health_check().await
    }

    /// Clears all gateway metadata; see
    /// [`MetadataProvider::clear_metadata`].
    pub async fn clear_metadata(&self, confirmation: &str) -> Result<Value> {
        tracing::warn!(
            target: TRACING_TARGET,
            "Clearing all gateway metadata"
        );

        self.inner.clear_metadata(confirmation).await
    }

    fn log_outcome<T: fmt::Debug>(
        &self,
        operation: &'static str,
        result: &Result<T>,
        started_at: Instant,
    ) {
        let elapsed = started_at.elapsed();

        match result {
            Ok(outcome) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    operation,
                    outcome = ?outcome,
                    elapsed_ms = elapsed.as_millis(),
                    "Metadata operation completed"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    operation,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Metadata operation error"
                );
            }
        }
    }
}
