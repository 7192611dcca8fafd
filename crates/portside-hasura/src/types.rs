//! Request configurations and outcome enums for the metadata API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of relational backend a data source connects to.
///
/// The kind prefixes every metadata operation name on the wire
/// (`snowflake_add_source`, `pg_track_table`, ...) and selects the
/// table-spec encoding the gateway expects for that backend. Adding a kind
/// means choosing its encoding in [`SourceKind::table_spec`]; there is no
/// runtime "unsupported kind" path.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    /// Snowflake warehouse, connected over JDBC.
    Snowflake,
    /// PostgreSQL database; also the gateway's built-in default source.
    #[serde(rename = "pg")]
    #[strum(serialize = "pg")]
    Postgres,
}

impl SourceKind {
    /// Returns the wire prefix for metadata operation names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Snowflake => "snowflake",
            Self::Postgres => "pg",
        }
    }

    /// Encodes a table reference the way this backend's metadata
    /// operations expect it.
    ///
    /// PostgreSQL sources take a schema-qualified object; Snowflake sources
    /// take a single-element name path.
    #[must_use]
    pub fn table_spec(self, table: &QualifiedTable) -> TableSpec {
        match self {
            Self::Postgres => TableSpec::Qualified {
                schema: table.schema_name.clone(),
                name: table.table_name.clone(),
            },
            Self::Snowflake => TableSpec::NamePath(vec![table.table_name.clone()]),
        }
    }
}

/// A schema-qualified table reference.
///
/// The wire shape matches what `*_get_source_tables` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedTable {
    /// Schema holding the table.
    #[serde(rename = "schema")]
    pub schema_name: String,
    /// Table name.
    #[serde(rename = "name")]
    pub table_name: String,
}

/// Table reference encoding, selected per source kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TableSpec {
    /// `{"schema": ..., "name": ...}` object for schema-addressed backends.
    Qualified {
        /// Schema holding the table.
        schema: String,
        /// Table name.
        name: String,
    },
    /// Name-path list for backends addressed by a session-scoped namespace.
    NamePath(Vec<String>),
}

/// Configuration of a data source to register with the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Backend kind of the source.
    pub kind: SourceKind,
    /// Logical source name; deterministic per product and major version so
    /// sibling ports reuse one registered source.
    pub name: String,
    /// Connection configuration blob (e.g. a JDBC URL), passed through to
    /// the gateway untouched.
    pub configuration: Value,
}

/// Configuration of a table to track on a registered source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Backend kind of the owning source.
    pub kind: SourceKind,
    /// Name of the owning source.
    pub source_name: String,
    /// The table to track, as it exists on the backend.
    pub source_table: QualifiedTable,
    /// Custom name the table is exposed under in the GraphQL schema.
    pub custom_table_name: String,
    /// Select root field name.
    pub select_root_field: String,
    /// Select-by-primary-key root field name.
    pub select_by_pk_root_field: String,
    /// Aggregate root field name.
    pub select_aggregate_root_field: String,
    /// Streaming subscription root field name.
    pub select_stream_root_field: String,
    /// Comment attached to the tracked table.
    pub comment: String,
}

impl TableConfig {
    /// Returns the wire encoding of the source table for this config's
    /// backend kind.
    #[must_use]
    pub fn table_spec(&self) -> TableSpec {
        self.kind.table_spec(&self.source_table)
    }
}

/// Outcome of registering a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AddSourceOutcome {
    /// The source was registered.
    Success,
    /// A source with this name is already registered.
    AlreadyExists,
    /// The gateway refused the operation.
    Failure,
}

/// Outcome of dropping a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DropSourceOutcome {
    /// The source was dropped.
    Success,
    /// No source with this name is registered.
    NotExists,
    /// The gateway refused the operation.
    Failure,
}

/// Outcome of tracking a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TrackTableOutcome {
    /// The table is now tracked.
    Success,
    /// The table was already tracked.
    AlreadyTracked,
    /// The gateway refused the operation.
    Failure,
}

/// Outcome of untracking a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum UntrackTableOutcome {
    /// The table is no longer tracked.
    Success,
    /// The table was not tracked to begin with.
    NotTracked,
    /// The gateway refused the operation.
    Failure,
}

/// Outcome of creating a select permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CreatePermissionOutcome {
    /// The permission was created.
    Success,
    /// The role already holds a select permission on the table.
    AlreadyExists,
    /// The gateway refused the operation.
    Failure,
}

/// Outcome of dropping a select permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DropPermissionOutcome {
    /// The permission was dropped.
    Success,
    /// The role held no select permission on the table.
    NotExists,
    /// The gateway refused the operation.
    Failure,
}

/// Health of the gateway as reported by its `healthz` probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum GatewayHealth {
    /// Gateway is serving and its metadata is consistent.
    Ok,
    /// Gateway is serving but reports inconsistent metadata.
    MetadataWarning,
    /// Gateway is not serving.
    Error,
}

/// A batched raw-SQL request against the `v2/query` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSqlRequest {
    /// Statements to run, in order, as one bulk call.
    pub statements: Vec<String>,
    /// Source to run against; `None` targets the gateway's built-in
    /// PostgreSQL source.
    pub source: Option<DataSourceConfig>,
    /// Whether to cascade dependent metadata objects.
    pub cascade: bool,
    /// Whether to re-check metadata consistency after running.
    pub check_metadata_consistency: bool,
}

impl RunSqlRequest {
    /// Creates a bulk request with the default flags.
    pub fn new(statements: Vec<String>) -> Self {
        Self {
            statements,
            source: None,
            cascade: false,
            check_metadata_consistency: false,
        }
    }

    /// Targets the request at the given source.
    #[must_use]
    pub fn with_source(mut self, source: DataSourceConfig) -> Self {
        self.source = Some(source);
        self
    }
}
