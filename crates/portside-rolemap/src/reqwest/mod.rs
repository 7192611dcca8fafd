//! Reqwest-based HTTP client for the role-mapping API.
//!
//! This module provides a reqwest-based implementation of the
//! [`crate::RoleMappingProvider`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use portside_rolemap::reqwest::{RoleMapperClient, RoleMapperConfig};
//! use portside_rolemap::RoleMappingService;
//!
//! let config = RoleMapperConfig::new("http://rolemapper:8085");
//! let client = RoleMapperClient::new(config)?;
//!
//! // Convert to a service for dependency injection
//! let service: RoleMappingService = client.into_service();
//! ```

mod client;
mod config;
mod error;

pub use client::RoleMapperClient;
pub use config::RoleMapperConfig;
pub use error::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "portside_rolemap::reqwest";
