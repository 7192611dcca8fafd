//! Descriptor document model, parsing and component resolution.

pub mod model;
pub mod parse;
pub mod resolve;

pub use model::{DataProduct, GraphqlOutputPort, GraphqlPortSpec, OutputPort, RelationalSpec};
pub use parse::{ProvisioningDescriptor, parse_descriptor};
pub use resolve::{ResolvedPorts, resolve};

/// Shared descriptor fixtures for the crate's unit tests.
///
/// The scenario mirrors a realistic product: domain `healthcare`, product
/// `Vaccinations` at version `0.1.0`, a gateway port named
/// `Hasura Output Port` wrapping a Snowflake view.
#[cfg(test)]
pub(crate) mod test_fixtures {
    use serde_json::Value;

    use super::DataProduct;

    pub const DESCRIPTOR_YAML: &str = r#"
dataProduct:
  id: urn:dmb:dp:healthcare:vaccinations:0
  name: Vaccinations
  domain: healthcare
  environment: development
  version: 0.1.0
  dataProductOwner: user:jane.doe_example.com
  devGroup: group:dev-healthcare
  ownerGroup: group:healthcare
  specific: {}
  components:
    - id: urn:dmb:cmp:healthcare:vaccinations:0:hasura-output-port
      name: Hasura Output Port
      fullyQualifiedName: Vaccinations Hasura Output Port
      description: GraphQL API of the vaccinations view
      kind: outputport
      version: 0.1.0
      infrastructureTemplateId: urn:dmb:itm:hasura-provisioner:0
      useCaseTemplateId: urn:dmb:utm:hasura-template:0.0.0
      dependsOn:
        - urn:dmb:cmp:healthcare:vaccinations:0:snowflake-output-port
      platform: Hasura
      technology: Hasura
      outputPortType: GraphQL
      creationDate: 2023-06-12T12:00:00Z
      startDate: 2023-06-12T12:00:00Z
      tags: []
      sampleData: {}
      semanticLinking: []
      specific:
        customTableName: healthcare_vaccinations_0_hasuraoutputport_vaccinations
        select: healthcare_vaccinations_0_hasuraoutputport_select
        selectByPk: healthcare_vaccinations_0_hasuraoutputport_select_by_pk
        selectAggregate: healthcare_vaccinations_0_hasuraoutputport_select_aggregate
        selectStream: healthcare_vaccinations_0_hasuraoutputport_select_stream
    - id: urn:dmb:cmp:healthcare:vaccinations:0:snowflake-output-port
      name: Snowflake Output Port
      fullyQualifiedName: Vaccinations Snowflake Output Port
      description: Snowflake view of the vaccinations data
      kind: outputport
      version: 0.1.0
      infrastructureTemplateId: urn:dmb:itm:snowflake-provisioner:0
      useCaseTemplateId: urn:dmb:utm:snowflake-template:0.0.0
      dependsOn: []
      platform: Snowflake
      technology: Snowflake
      outputPortType: SQL
      creationDate: 2023-06-12T12:00:00Z
      startDate: 2023-06-12T12:00:00Z
      tags: []
      sampleData: {}
      semanticLinking: []
      specific:
        database: HEALTHCARE
        schema: VACCINATIONS_0
        viewName: VACCINATIONS_VIEW
componentIdToProvision: urn:dmb:cmp:healthcare:vaccinations:0:hasura-output-port
"#;

    pub fn data_product() -> DataProduct {
        super::parse_descriptor(DESCRIPTOR_YAML)
            .expect("fixture descriptor must parse")
            .data_product
    }

    pub fn source_port_value() -> Value {
        data_product().components[1].clone()
    }
}
