//! Component-dependency resolution.
//!
//! Given the full data-product graph and the id of the port to provision,
//! locate the gateway output port, check it declares exactly one upstream
//! dependency, and coerce both components into typed entities. Pure lookup,
//! no side effects; component order is irrelevant and the first id match
//! wins.

use serde_json::Value;

use super::{DataProduct, GraphqlOutputPort, OutputPort};
use crate::{Error, Result};

/// The two typed entities a provisioning request operates on.
#[derive(Debug, Clone)]
pub struct ResolvedPorts {
    /// The GraphQL gateway port being provisioned.
    pub graphql_port: GraphqlOutputPort,
    /// The upstream relational port the gateway port wraps.
    pub source_port: OutputPort,
}

/// Resolves the target component and its single upstream dependency.
///
/// Fails with a descriptor error when the target id (or its declared
/// dependency id) is absent from the component list, when the target does
/// not declare exactly one dependency, or when either component does not
/// coerce into the expected entity shape.
pub fn resolve(product: &DataProduct, target_component_id: &str) -> Result<ResolvedPorts> {
    let graphql_value = find_component(product, target_component_id)?;
    let graphql_port: GraphqlOutputPort =
        serde_json::from_value(graphql_value.clone()).map_err(|err| {
            Error::descriptor(format!(
                "component {target_component_id} is not a valid GraphQL output port"
            ))
            .with_source(err)
        })?;

    let num_dependencies = graphql_port.depends_on.len();
    if num_dependencies != 1 {
        return Err(Error::descriptor(format!(
            "the GraphQL output port dependency list should contain exactly one dependency, \
             but instead had {num_dependencies}"
        )));
    }

    let source_id = &graphql_port.depends_on[0];
    let source_value = find_component(product, source_id)?;
    let source_port: OutputPort = serde_json::from_value(source_value.clone()).map_err(|err| {
        Error::descriptor(format!("component {source_id} is not a valid output port"))
            .with_source(err)
    })?;

    Ok(ResolvedPorts {
        graphql_port,
        source_port,
    })
}

/// Finds a component by id within the product's component list.
///
/// Ids are expected to be unique; on duplicates the first match wins.
fn find_component<'a>(product: &'a DataProduct, component_id: &str) -> Result<&'a Value> {
    product
        .components
        .iter()
        .find(|component| component.get("id").and_then(Value::as_str) == Some(component_id))
        .ok_or_else(|| {
            Error::descriptor(format!(
                "unable to find component id {component_id} in the data product components list"
            ))
        })
}
