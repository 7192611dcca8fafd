//! Naming convention for generated GraphQL identifiers.
//!
//! Every identifier a gateway port exposes must start with a tenant prefix
//! derived from the product and port metadata:
//!
//! ```text
//! <domain>_<product name>_<product major version>_<port name>_
//! ```
//!
//! where each piece is normalized to lowercase letters and digits (spaces
//! and hyphens stripped). The prefix keeps identifiers of different
//! products, versions and ports from colliding inside the shared gateway
//! schema. The validator is whole-record: it accumulates every violation
//! before returning, so one request surfaces all naming problems at once.

use crate::descriptor::{DataProduct, GraphqlOutputPort};

/// Normalizes a metadata value for use inside a generated identifier.
///
/// Strips spaces and hyphens and lowercases the rest, matching the
/// convention the scaffolding templates use when generating the default
/// identifiers.
#[must_use]
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Computes the tenant prefix every generated identifier must start with.
#[must_use]
pub fn prefix(product: &DataProduct, port: &GraphqlOutputPort) -> String {
    format!(
        "{}_{}_{}_{}_",
        normalize(&product.domain),
        normalize(&product.name),
        normalize(product.major_version()),
        normalize(&port.name),
    )
}

/// Computes the deterministic data source name for a product.
///
/// The name is shared by all output ports of the same product and major
/// version, so repeated provisions against the same relational backend
/// reuse one registered source instead of duplicating it.
#[must_use]
pub fn source_name(product: &DataProduct) -> String {
    format!(
        "{}_{}_{}",
        normalize(&product.domain),
        normalize(&product.name),
        normalize(product.major_version()),
    )
}

/// Computes the deterministic read-role id for a gateway port.
#[must_use]
pub fn role_id(product: &DataProduct, port: &GraphqlOutputPort) -> String {
    format!("{}role", prefix(product, port))
}

/// Validates the five generated identifiers of a gateway port.
///
/// Returns `Ok(())` when every identifier starts with the computed prefix
/// and the four root field names are pairwise distinct; otherwise returns
/// the full, ordered list of human-readable violations. Purely a function
/// of the two entities; performs no network calls and runs before every
/// workflow entry point.
pub fn validate_naming(
    product: &DataProduct,
    port: &GraphqlOutputPort,
) -> Result<(), Vec<String>> {
    let prefix = prefix(product, port);
    let spec = &port.specific;

    let mut errors = Vec::new();

    let prefix_checks = [
        (&spec.custom_table_name, "customTableName", "custom table name"),
        (&spec.select, "select", "select root field"),
        (
            &spec.select_by_pk,
            "selectByPk",
            "select by primary key root field",
        ),
        (
            &spec.select_aggregate,
            "selectAggregate",
            "select aggregate root field",
        ),
        (
            &spec.select_stream,
            "selectStream",
            "select stream root field",
        ),
    ];

    for (value, field_name, friendly_name) in prefix_checks {
        if !value.starts_with(&prefix) {
            errors.push(prefix_error(value, field_name, friendly_name, &prefix));
        }
    }

    let mut root_fields = [
        spec.select.as_str(),
        spec.select_by_pk.as_str(),
        spec.select_aggregate.as_str(),
        spec.select_stream.as_str(),
    ];
    root_fields.sort_unstable();
    if root_fields.windows(2).any(|pair| pair[0] == pair[1]) {
        errors.push(
            "The provided root field names are not unique. Check fields: select, selectByPk, \
             selectAggregate and selectStream and verify they are unique."
                .to_string(),
        );
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Builds the error message for one violated prefix rule.
fn prefix_error(value: &str, field_name: &str, friendly_name: &str, prefix: &str) -> String {
    format!(
        "The {friendly_name} (field: {field_name}) must start with prefix \"{prefix}\" but the \
         actual value \"{value}\" does not. The format of the prefix is \
         <domain>_<data product name>_<data product major version>_<output port name> where all \
         the components are normalized (only lowercase letters and numbers)."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::test_fixtures;

    fn fixture() -> (DataProduct, GraphqlOutputPort) {
        let product = test_fixtures::data_product();
        let resolved = crate::descriptor::resolve(
            &product,
            "urn:dmb:cmp:healthcare:vaccinations:0:hasura-output-port",
        )
        .unwrap();
        (product, resolved.graphql_port)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Hasura Output Port"), "hasuraoutputport");
        assert_eq!(normalize("my-data-product"), "mydataproduct");
        assert_eq!(normalize("Vaccinations"), "vaccinations");
    }

    #[test]
    fn test_prefix_scenario() {
        let (product, port) = fixture();
        assert_eq!(
            prefix(&product, &port),
            "healthcare_vaccinations_0_hasuraoutputport_"
        );
    }

    #[test]
    fn test_source_name_and_role_id() {
        let (product, port) = fixture();
        assert_eq!(source_name(&product), "healthcare_vaccinations_0");
        assert_eq!(
            role_id(&product, &port),
            "healthcare_vaccinations_0_hasuraoutputport_role"
        );
    }

    #[test]
    fn test_valid_port_passes() {
        let (product, port) = fixture();
        assert!(validate_naming(&product, &port).is_ok());
    }

    #[test]
    fn test_single_prefix_violation_yields_one_named_error() {
        let (product, mut port) = fixture();
        port.specific.custom_table_name = "wrong_prefix_vaccinations".to_string();

        let errors = validate_naming(&product, &port).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("customTableName"));
        assert!(errors[0].contains("wrong_prefix_vaccinations"));
        assert!(errors[0].contains("healthcare_vaccinations_0_hasuraoutputport_"));
    }

    #[test]
    fn test_errors_accumulate_not_fail_fast() {
        let (product, mut port) = fixture();
        port.specific.select = "bad_select".to_string();
        port.specific.select_by_pk = "bad_select_by_pk".to_string();
        port.specific.select_stream = "bad_stream".to_string();

        let errors = validate_naming(&product, &port).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_uniqueness_error_is_aggregate_and_additive() {
        let (product, mut port) = fixture();
        // Three prefix violations plus a collision between all four root
        // fields must yield exactly four errors.
        let duplicate = "bad_field".to_string();
        port.specific.select = duplicate.clone();
        port.specific.select_by_pk = duplicate.clone();
        port.specific.select_stream = duplicate.clone();
        port.specific.select_aggregate =
            "healthcare_vaccinations_0_hasuraoutputport_select_aggregate".to_string();

        let errors = validate_naming(&product, &port).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[3].contains("not unique"));
    }

    #[test]
    fn test_uniqueness_alone() {
        let (product, mut port) = fixture();
        port.specific.select_by_pk = port.specific.select.clone();

        let errors = validate_naming(&product, &port).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("not unique"));
    }
}
