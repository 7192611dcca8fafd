//! Reqwest-based HTTP client for the gateway metadata API.
//!
//! This module provides a reqwest-based implementation of the
//! [`crate::MetadataProvider`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use portside_hasura::reqwest::{HasuraClient, HasuraConfig};
//! use portside_hasura::MetadataService;
//!
//! let config = HasuraConfig::new("http://hasura:8080", "admin-secret");
//! let client = HasuraClient::new(config)?;
//!
//! // Convert to a service for dependency injection
//! let service: MetadataService = client.into_service();
//! ```

mod client;
mod config;
mod error;
mod outcome;

pub use client::HasuraClient;
pub use config::HasuraConfig;
pub use error::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "portside_hasura::reqwest";
