//! Derivation of gateway configurations from a resolved descriptor.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use portside_core::Result;
use portside_core::descriptor::{DataProduct, ResolvedPorts};
use portside_core::naming;
use portside_hasura::types::{DataSourceConfig, QualifiedTable, SourceKind, TableConfig};
use serde_json::json;

use crate::config::WarehouseConfig;

/// Characters passed through unencoded in the JDBC URL password.
/// Everything else is percent-encoded; connection strings otherwise break
/// on `&`, `=`, `%` and friends.
const PASSWORD_UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Derives the data source and table configurations for a resolved port
/// pair.
///
/// Schema and view identifiers are uppercased to match the warehouse
/// catalog convention. The data source name is deterministic per product
/// and major version, so sibling ports reuse one registered source.
pub(crate) fn derive_configs(
    warehouse: &WarehouseConfig,
    product: &DataProduct,
    ports: &ResolvedPorts,
) -> Result<(DataSourceConfig, TableConfig)> {
    let relational = ports.source_port.relational_spec()?;
    let schema = relational.schema.to_uppercase();
    let table = relational.view_name.to_uppercase();
    let source_name = naming::source_name(product);

    let source = DataSourceConfig {
        kind: SourceKind::Snowflake,
        name: source_name.clone(),
        configuration: json!({
            "fully_qualify_all_names": false,
            "jdbc_url": jdbc_url(warehouse, &relational.database, &relational.schema),
        }),
    };

    let spec = &ports.graphql_port.specific;
    let comment = format!("Access to the {table} table in schema {schema}");
    let table_config = TableConfig {
        kind: SourceKind::Snowflake,
        source_name,
        source_table: QualifiedTable {
            schema_name: schema,
            table_name: table,
        },
        custom_table_name: spec.custom_table_name.clone(),
        select_root_field: spec.select.clone(),
        select_by_pk_root_field: spec.select_by_pk.clone(),
        select_aggregate_root_field: spec.select_aggregate.clone(),
        select_stream_root_field: spec.select_stream.clone(),
        comment,
    };

    Ok((source, table_config))
}

/// Builds the warehouse JDBC URL the gateway connects with.
///
/// Database and schema come from the source port verbatim; only the
/// password is percent-encoded, the other parameters are controlled
/// identifiers.
fn jdbc_url(warehouse: &WarehouseConfig, database: &str, schema: &str) -> String {
    let password = utf8_percent_encode(&warehouse.password, PASSWORD_UNRESERVED);
    format!(
        "jdbc:snowflake://{host}/?user={user}&password={password}&role={role}&warehouse={wh}&db={database}&schema={schema}",
        host = warehouse.host,
        user = warehouse.user,
        role = warehouse.role,
        wh = warehouse.warehouse,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse() -> WarehouseConfig {
        WarehouseConfig {
            host: "account.snowflakecomputing.com".to_string(),
            user: "svc_gateway".to_string(),
            password: "p@ss word&1".to_string(),
            role: "GATEWAY_ROLE".to_string(),
            warehouse: "COMPUTE_WH".to_string(),
        }
    }

    #[test]
    fn test_jdbc_url_encodes_password() {
        let url = jdbc_url(&warehouse(), "HEALTHCARE", "VACCINATIONS_0");
        assert_eq!(
            url,
            "jdbc:snowflake://account.snowflakecomputing.com/?user=svc_gateway&\
             password=p%40ss%20word%261&role=GATEWAY_ROLE&warehouse=COMPUTE_WH&\
             db=HEALTHCARE&schema=VACCINATIONS_0"
        );
    }

    #[test]
    fn test_jdbc_url_keeps_unreserved_password_characters() {
        let mut config = warehouse();
        config.password = "plain_pass-1.~".to_string();
        let url = jdbc_url(&config, "DB", "SCHEMA");
        assert!(url.contains("password=plain_pass-1.~&"));
    }
}
