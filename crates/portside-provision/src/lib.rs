#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod derive;
mod provisioner;

pub mod config;

pub use config::WarehouseConfig;
pub use portside_core::{BoxedError, Error, ErrorKind, Result};
pub use provisioner::{Provisioner, WorkflowOutcome};

/// Tracing target for workflow operations.
pub const TRACING_TARGET: &str = "portside_provision::workflow";
