#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod service;

pub mod types;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use portside_core::{BoxedError, Error, ErrorKind, Result};
pub use service::RoleMappingService;
pub use types::{
    GroupMappingOutcome, GroupRoleMappings, MappingSystemError, MappingValidationError, Role,
    RoleOutcome, SyncOutcome, UserMappingOutcome, UserRoleMappings,
};

/// Tracing target for role-mapping operations.
pub const TRACING_TARGET: &str = "portside_rolemap::mapping";

/// Core trait for role-mapping operations.
///
/// Implementations map the remote's strict 200/400/500 contract onto
/// [`SyncOutcome`]; any other status is a protocol violation and must
/// propagate as a hard error.
#[async_trait::async_trait]
pub trait RoleMappingProvider: Send + Sync {
    /// Creates (or upserts) a role.
    async fn create_role(&self, role: &Role) -> Result<RoleOutcome>;

    /// Replaces the full user membership of a role.
    async fn update_user_mappings(
        &self,
        mappings: &UserRoleMappings,
    ) -> Result<UserMappingOutcome>;

    /// Replaces the full group membership of a role.
    async fn update_group_mappings(
        &self,
        mappings: &GroupRoleMappings,
    ) -> Result<GroupMappingOutcome>;
}
