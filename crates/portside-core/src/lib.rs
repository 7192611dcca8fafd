#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod descriptor;
pub mod naming;
pub mod status;

// Re-export key types for convenience
pub use descriptor::{
    DataProduct, GraphqlOutputPort, GraphqlPortSpec, OutputPort, ProvisioningDescriptor,
    RelationalSpec, ResolvedPorts, parse_descriptor, resolve,
};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use status::{
    ProvisioningState, ProvisioningStatus, SystemError, ValidationError, ValidationResult,
};
