//! YAML parsing of the inbound descriptor document.

use serde::{Deserialize, Serialize};

use super::DataProduct;
use crate::{Error, Result};

/// The provisioning descriptor document: the full data-product graph plus
/// the id of the component to act on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningDescriptor {
    /// The full data-product graph.
    pub data_product: DataProduct,
    /// Id of the output port this request targets.
    pub component_id_to_provision: String,
}

/// Parses a provisioning descriptor out of its YAML representation.
///
/// Shape errors (missing keys, wrong field types) surface as descriptor
/// errors carrying the deserializer message, so a caller can echo the
/// specific defect back to the requester.
pub fn parse_descriptor(descriptor_yaml: &str) -> Result<ProvisioningDescriptor> {
    serde_yaml::from_str(descriptor_yaml)
        .map_err(|err| Error::descriptor("unable to parse the descriptor document").with_source(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_descriptor() {
        let descriptor = parse_descriptor(crate::descriptor::test_fixtures::DESCRIPTOR_YAML)
            .expect("fixture descriptor must parse");

        assert_eq!(descriptor.data_product.domain, "healthcare");
        assert_eq!(descriptor.data_product.name, "Vaccinations");
        assert_eq!(descriptor.data_product.components.len(), 2);
        assert_eq!(
            descriptor.component_id_to_provision,
            "urn:dmb:cmp:healthcare:vaccinations:0:hasura-output-port"
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_descriptor("dataProduct: [not, a, product]").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Descriptor);
    }
}
