//! Mock metadata provider for testing.
//!
//! The mock answers every operation with a scripted outcome and counts how
//! often each operation was invoked, so workflow tests can assert both the
//! terminal state and which remote calls were (not) attempted.
//!
//! # Example
//!
//! ```rust,ignore
//! use portside_hasura::mock::MockMetadataProvider;
//! use portside_hasura::{AddSourceOutcome, MetadataService};
//!
//! let mock = MockMetadataProvider::default()
//!     .with_add_source(AddSourceOutcome::AlreadyExists);
//! let calls = mock.calls();
//! let service = MetadataService::new(mock);
//! // ... drive the workflow, then assert on calls.add_source() etc.
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use crate::types::{
    AddSourceOutcome, CreatePermissionOutcome, DataSourceConfig, DropPermissionOutcome,
    DropSourceOutcome, GatewayHealth, QualifiedTable, RunSqlRequest, TableConfig,
    TrackTableOutcome, UntrackTableOutcome,
};
use crate::{CLEAR_METADATA_CONFIRMATION, MetadataProvider, Result};

/// Per-operation invocation counters, shared between the mock and the test.
#[derive(Debug, Default)]
pub struct CallCounters {
    add_source: AtomicUsize,
    drop_source: AtomicUsize,
    track_table: AtomicUsize,
    untrack_table: AtomicUsize,
    create_select_permission: AtomicUsize,
    drop_select_permission: AtomicUsize,
}

impl CallCounters {
    /// Number of `add_source` invocations.
    pub fn add_source(&self) -> usize {
        self.add_source.load(Ordering::SeqCst)
    }

    /// Number of `drop_source` invocations.
    pub fn drop_source(&self) -> usize {
        self.drop_source.load(Ordering::SeqCst)
    }

    /// Number of `track_table` invocations.
    pub fn track_table(&self) -> usize {
        self.track_table.load(Ordering::SeqCst)
    }

    /// Number of `untrack_table` invocations.
    pub fn untrack_table(&self) -> usize {
        self.untrack_table.load(Ordering::SeqCst)
    }

    /// Number of `create_select_permission` invocations.
    pub fn create_select_permission(&self) -> usize {
        self.create_select_permission.load(Ordering::SeqCst)
    }

    /// Number of `drop_select_permission` invocations.
    pub fn drop_select_permission(&self) -> usize {
        self.drop_select_permission.load(Ordering::SeqCst)
    }
}

/// Mock implementation of [`MetadataProvider`] with scripted outcomes.
#[derive(Debug, Clone)]
pub struct MockMetadataProvider {
    add_source_outcome: AddSourceOutcome,
    drop_source_outcome: DropSourceOutcome,
    track_table_outcome: TrackTableOutcome,
    untrack_table_outcome: UntrackTableOutcome,
    create_permission_outcome: CreatePermissionOutcome,
    drop_permission_outcome: DropPermissionOutcome,
    health: GatewayHealth,
    source_tables: Vec<QualifiedTable>,
    calls: Arc<CallCounters>,
}

impl Default for MockMetadataProvider {
    fn default() -> Self {
        Self {
            add_source_outcome: AddSourceOutcome::Success,
            drop_source_outcome: DropSourceOutcome::Success,
            track_table_outcome: TrackTableOutcome::Success,
            untrack_table_outcome: UntrackTableOutcome::Success,
            create_permission_outcome: CreatePermissionOutcome::Success,
            drop_permission_outcome: DropPermissionOutcome::Success,
            health: GatewayHealth::Ok,
            source_tables: Vec::new(),
            calls: Arc::new(CallCounters::default()),
        }
    }
}

impl MockMetadataProvider {
    /// Returns a handle to the invocation counters.
    pub fn calls(&self) -> Arc<CallCounters> {
        Arc::clone(&self.calls)
    }

    /// Scripts the `add_source` outcome.
    #[must_use]
    pub fn with_add_source(mut self, outcome: AddSourceOutcome) -> Self {
        self.add_source_outcome = outcome;
        self
    }

    /// Scripts the `drop_source` outcome.
    #[must_use]
    pub fn with_drop_source(mut self, outcome: DropSourceOutcome) -> Self {
        self.drop_source_outcome = outcome;
        self
    }

    /// Scripts the `track_table` outcome.
    #[must_use]
    pub fn with_track_table(mut self, outcome: TrackTableOutcome) -> Self {
        self.track_table_outcome = outcome;
        self
    }

    /// Scripts the `untrack_table` outcome.
    #[must_use]
    pub fn with_untrack_table(mut self, outcome: UntrackTableOutcome) -> Self {
        self.untrack_table_outcome = outcome;
        self
    }

    /// Scripts the `create_select_permission` outcome.
    #[must_use]
    pub fn with_create_select_permission(mut self, outcome: CreatePermissionOutcome) -> Self {
        self.create_permission_outcome = outcome;
        self
    }

    /// Scripts the `drop_select_permission` outcome.
    #[must_use]
    pub fn with_drop_select_permission(mut self, outcome: DropPermissionOutcome) -> Self {
        self.drop_permission_outcome = outcome;
        self
    }

    /// Scripts the reported gateway health.
    #[must_use]
    pub fn with_health(mut self, health: GatewayHealth) -> Self {
        self.health = health;
        self
    }

    /// Scripts the table list returned by `get_source_tables`.
    #[must_use]
    pub fn with_source_tables(mut self, tables: Vec<QualifiedTable>) -> Self {
        self.source_tables = tables;
        self
    }
}

#[async_trait::async_trait]
impl MetadataProvider for MockMetadataProvider {
    async fn add_source(&self, _source: &DataSourceConfig) -> Result<AddSourceOutcome> {
        self.calls.add_source.fetch_add(1, Ordering::SeqCst);
        Ok(self.add_source_outcome)
    }

    async fn drop_source(&self, _source: &DataSourceConfig) -> Result<DropSourceOutcome> {
        self.calls.drop_source.fetch_add(1, Ordering::SeqCst);
        Ok(self.drop_source_outcome)
    }

    async fn track_table(&self, _table: &TableConfig) -> Result<TrackTableOutcome> {
        self.calls.track_table.fetch_add(1, Ordering::SeqCst);
        Ok(self.track_table_outcome)
    }

    async fn untrack_table(&self, _table: &TableConfig) -> Result<UntrackTableOutcome> {
        self.calls.untrack_table.fetch_add(1, Ordering::SeqCst);
        Ok(self.untrack_table_outcome)
    }

    async fn create_select_permission(
        &self,
        _table: &TableConfig,
        _role_id: &str,
    ) -> Result<CreatePermissionOutcome> {
        self.calls
            .create_select_permission
            .fetch_add(1, Ordering::SeqCst);
        Ok(self.create_permission_outcome)
    }

    async fn drop_select_permission(
        &self,
        _table: &TableConfig,
        _role_id: &str,
    ) -> Result<DropPermissionOutcome> {
        self.calls
            .drop_select_permission
            .fetch_add(1, Ordering::SeqCst);
        Ok(self.drop_permission_outcome)
    }

    async fn get_source_tables(
        &self,
        _source: Option<&DataSourceConfig>,
    ) -> Result<Vec<QualifiedTable>> {
        Ok(self.source_tables.clone())
    }

    async fn run_sql(&self, _request: &RunSqlRequest) -> Result<Value> {
        Ok(json!([{"result_type": "CommandOk", "result": null}]))
    }

    async fn health_check(&self) -> Result<GatewayHealth> {
        Ok(self.health)
    }

    async fn clear_metadata(&self, confirmation: &str) -> Result<Value> {
        if confirmation != CLEAR_METADATA_CONFIRMATION {
            return Err(crate::Error::precondition(
                "refusing to clear gateway metadata without the exact confirmation phrase",
            ));
        }
        Ok(json!({"message": "success"}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetadataService;

    #[tokio::test]
    async fn test_counts_invocations() {
        let mock = MockMetadataProvider::default()
            .with_track_table(TrackTableOutcome::AlreadyTracked);
        let calls = mock.calls();
        let service = MetadataService::new(mock);

        let table = TableConfig {
            kind: crate::SourceKind::Snowflake,
            source_name: "dom_dp_0".to_string(),
            source_table: QualifiedTable {
                schema_name: "S".to_string(),
                table_name: "T".to_string(),
            },
            custom_table_name: "dom_dp_0_op_t".to_string(),
            select_root_field: "dom_dp_0_op_select".to_string(),
            select_by_pk_root_field: "dom_dp_0_op_select_by_pk".to_string(),
            select_aggregate_root_field: "dom_dp_0_op_select_aggregate".to_string(),
            select_stream_root_field: "dom_dp_0_op_select_stream".to_string(),
            comment: "Access to the T table in schema S".to_string(),
        };

        let outcome = service.track_table(&table).await.unwrap();
        assert_eq!(outcome, TrackTableOutcome::AlreadyTracked);
        assert_eq!(calls.track_table(), 1);
        assert_eq!(calls.add_source(), 0);
    }
}
