//! Inbound request payloads and descriptor unpacking.

use portside_core::descriptor::{self, DataProduct, ResolvedPorts};
use portside_core::status::ValidationError;
use serde::{Deserialize, Serialize};

/// Kind of descriptor a provisioning request carries.
///
/// This service acts on single components; any other kind is rejected
/// before the descriptor is even parsed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DescriptorKind {
    /// The full data-product descriptor.
    DataproductDescriptor,
    /// A single component of a data product.
    ComponentDescriptor,
    /// The full descriptor enriched with provisioning results.
    DataproductDescriptorWithResults,
}

/// A provisioning, unprovisioning or validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningRequest {
    /// Kind of the carried descriptor.
    pub descriptor_kind: DescriptorKind,
    /// The descriptor document as YAML.
    pub descriptor: String,
}

/// The provisioning context an ACL update refers back to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionInfo {
    /// The descriptor document of the latest complete provisioning
    /// request, as YAML.
    pub request: String,
    /// The result of that request; unused here.
    #[serde(default)]
    pub result: String,
}

/// An access-control update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAclRequest {
    /// Subject references requesting access (`user:` / `group:`).
    pub refs: Vec<String>,
    /// The provisioning context identifying the component.
    pub provision_info: ProvisionInfo,
}

/// Unpacks a provisioning request into its typed entities.
///
/// Gate first on the descriptor kind, then parse the YAML document and
/// resolve the target component and its dependency. Every defect surfaces
/// as a validation error to echo back with a 400.
pub(crate) fn unpack_provisioning_request(
    request: &ProvisioningRequest,
) -> Result<(DataProduct, ResolvedPorts), ValidationError> {
    if request.descriptor_kind != DescriptorKind::ComponentDescriptor {
        return Err(ValidationError::single(format!(
            "Expecting a COMPONENT_DESCRIPTOR but got a {} instead; please check with the \
             platform team.",
            request.descriptor_kind
        )));
    }

    unpack_descriptor(&request.descriptor)
}

/// Parses and resolves a descriptor document.
pub(crate) fn unpack_descriptor(
    descriptor_yaml: &str,
) -> Result<(DataProduct, ResolvedPorts), ValidationError> {
    let unpack = || -> portside_core::Result<(DataProduct, ResolvedPorts)> {
        let descriptor = descriptor::parse_descriptor(descriptor_yaml)?;
        let ports = descriptor::resolve(
            &descriptor.data_product,
            &descriptor.component_id_to_provision,
        )?;
        Ok((descriptor.data_product, ports))
    };

    unpack().map_err(|err| {
        ValidationError::new(vec!["Unable to parse the descriptor.".to_string(), err.to_string()])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_kind_wire_names() {
        assert_eq!(
            serde_json::to_value(DescriptorKind::ComponentDescriptor).unwrap(),
            serde_json::json!("COMPONENT_DESCRIPTOR")
        );
        assert_eq!(
            DescriptorKind::DataproductDescriptor.to_string(),
            "DATAPRODUCT_DESCRIPTOR"
        );
    }

    #[test]
    fn test_unpack_rejects_wrong_kind() {
        let request = ProvisioningRequest {
            descriptor_kind: DescriptorKind::DataproductDescriptor,
            descriptor: String::new(),
        };

        let error = unpack_provisioning_request(&request).unwrap_err();
        assert_eq!(
            error.errors,
            vec![
                "Expecting a COMPONENT_DESCRIPTOR but got a DATAPRODUCT_DESCRIPTOR instead; \
                 please check with the platform team."
            ]
        );
    }

    #[test]
    fn test_unpack_reports_parse_failures() {
        let error = unpack_descriptor("dataProduct: [not, a, product]").unwrap_err();
        assert_eq!(error.errors.len(), 2);
        assert_eq!(error.errors[0], "Unable to parse the descriptor.");
    }
}
