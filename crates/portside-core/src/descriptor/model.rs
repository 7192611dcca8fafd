//! Typed entities of the data-product descriptor document.
//!
//! The descriptor arrives as a YAML document produced by the platform. The
//! product holds its components as opaque JSON objects; the resolver coerces
//! the two components relevant to provisioning into the typed entities below.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// A data product as described by the inbound descriptor.
///
/// Immutable once parsed from a request. Components are kept as opaque JSON
/// objects keyed by their unique `id`; only the gateway output port and its
/// upstream relational port are ever coerced into typed entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProduct {
    /// Unique product identifier (urn).
    pub id: String,
    /// Human-readable product name.
    pub name: String,
    /// Domain the product belongs to.
    pub domain: String,
    /// Target environment (e.g. `development`, `production`).
    pub environment: String,
    /// Product version, `major.minor.patch`.
    pub version: String,
    /// Product owner reference.
    pub data_product_owner: String,
    /// Development group reference.
    pub dev_group: String,
    /// Owner group reference.
    pub owner_group: String,
    /// Product-level platform-specific payload, opaque to this service.
    #[serde(default)]
    pub specific: Value,
    /// Heterogeneous component list, keyed by unique `id`.
    pub components: Vec<Value>,
}

impl DataProduct {
    /// Returns the major version component of the product version.
    ///
    /// The descriptor carries a `major.minor.patch` version string; only the
    /// major component takes part in generated identifiers, so sibling minor
    /// releases share names.
    #[must_use]
    pub fn major_version(&self) -> &str {
        self.version.split('.').next().unwrap_or(&self.version)
    }
}

/// A generic output-port component.
///
/// This is the shape shared by every output port in the descriptor; the
/// relational source port is consumed through this type, with its
/// database/schema/view identifiers inside [`OutputPort::specific`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPort {
    /// Unique component identifier (urn).
    pub id: String,
    /// Human-readable component name.
    pub name: String,
    /// Fully qualified component name.
    pub fully_qualified_name: String,
    /// Free-form description.
    pub description: String,
    /// Component kind; output ports carry `outputport`.
    pub kind: String,
    /// Component version.
    pub version: String,
    /// Infrastructure template that provisions this component.
    pub infrastructure_template_id: String,
    /// Use-case template the component was scaffolded from.
    pub use_case_template_id: String,
    /// Ids of the components this port depends on.
    pub depends_on: Vec<String>,
    /// Platform the port is exposed on.
    pub platform: String,
    /// Concrete technology backing the port.
    pub technology: String,
    /// Output port flavor (e.g. `SQL`, `GraphQL`).
    pub output_port_type: String,
    /// When the component was created.
    pub creation_date: Timestamp,
    /// When the component goes live.
    pub start_date: Timestamp,
    /// Governance tags.
    #[serde(default)]
    pub tags: Vec<Value>,
    /// Optional sample data payload, opaque to this service.
    #[serde(default)]
    pub sample_data: Value,
    /// Semantic links to other assets, opaque to this service.
    #[serde(default)]
    pub semantic_linking: Vec<Value>,
    /// Technology-specific payload; shape depends on `technology`.
    #[serde(default)]
    pub specific: Value,
}

impl OutputPort {
    /// Coerces the technology-specific payload into the relational view
    /// identifiers of a source port.
    pub fn relational_spec(&self) -> Result<RelationalSpec> {
        serde_json::from_value(self.specific.clone()).map_err(|err| {
            Error::descriptor(format!(
                "component {} does not carry database/schema/viewName identifiers",
                self.id
            ))
            .with_source(err)
        })
    }
}

/// Relational view identifiers carried by a source output port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationalSpec {
    /// Database holding the view.
    pub database: String,
    /// Schema holding the view.
    pub schema: String,
    /// Name of the relational view to expose.
    pub view_name: String,
}

/// The GraphQL gateway output port being provisioned.
///
/// Same shape as [`OutputPort`] but with a fully typed `specific` payload:
/// the five generated GraphQL identifiers this service validates and hands
/// to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlOutputPort {
    /// Unique component identifier (urn).
    pub id: String,
    /// Human-readable component name.
    pub name: String,
    /// Fully qualified component name.
    pub fully_qualified_name: String,
    /// Free-form description.
    pub description: String,
    /// Component kind; output ports carry `outputport`.
    pub kind: String,
    /// Component version.
    pub version: String,
    /// Infrastructure template that provisions this component.
    pub infrastructure_template_id: String,
    /// Use-case template the component was scaffolded from.
    pub use_case_template_id: String,
    /// Ids of the components this port depends on; exactly one for a
    /// gateway port.
    pub depends_on: Vec<String>,
    /// Platform the port is exposed on.
    pub platform: String,
    /// Concrete technology backing the port.
    pub technology: String,
    /// Output port flavor; `GraphQL` for gateway ports.
    pub output_port_type: String,
    /// When the component was created.
    pub creation_date: Timestamp,
    /// When the component goes live.
    pub start_date: Timestamp,
    /// Governance tags.
    #[serde(default)]
    pub tags: Vec<Value>,
    /// Optional sample data payload, opaque to this service.
    #[serde(default)]
    pub sample_data: Value,
    /// Semantic links to other assets, opaque to this service.
    #[serde(default)]
    pub semantic_linking: Vec<Value>,
    /// The generated GraphQL identifiers for the tracked table.
    pub specific: GraphqlPortSpec,
}

/// The five generated identifiers of a gateway output port.
///
/// All of them must start with the tenant prefix derived from the product
/// and port metadata, and the four root field names must be pairwise
/// distinct. See [`crate::naming`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlPortSpec {
    /// Custom name the tracked table is exposed under.
    pub custom_table_name: String,
    /// Select root field name.
    pub select: String,
    /// Select-by-primary-key root field name.
    pub select_by_pk: String,
    /// Aggregate root field name.
    pub select_aggregate: String,
    /// Streaming subscription root field name.
    pub select_stream: String,
}
