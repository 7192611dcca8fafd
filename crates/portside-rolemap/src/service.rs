//! Role-mapping service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::types::{
    GroupMappingOutcome, GroupRoleMappings, Role, RoleOutcome, SyncOutcome, UserMappingOutcome,
    UserRoleMappings,
};
use crate::{Result, RoleMappingProvider, TRACING_TARGET};

/// Role-mapping service wrapper with observability.
///
/// This wrapper adds structured logging to any role-mapping provider
/// implementation. The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct RoleMappingService {
    inner: Arc<dyn RoleMappingProvider>,
}

impl fmt::Debug for RoleMappingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleMappingService").finish_non_exhaustive()
    }
}

impl RoleMappingService {
    /// Create a new role-mapping service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: RoleMappingProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Creates (or upserts) a role.
    pub async fn create_role(&self, role: &Role) -> Result<RoleOutcome> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            role_id = %role.role_id,
            component_id = %role.component_id,
            "Creating role"
        );

        let result = self.inner.create_role(role).await;
        self.log_outcome("create_role", &result, started_at);
        result
    }

    /// Replaces the full user membership of a role.
    pub async fn update_user_mappings(
        &self,
        mappings: &UserRoleMappings,
    ) -> Result<UserMappingOutcome> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            role_id = %mappings.role_id,
            users = mappings.users.len(),
            "Updating user role mappings"
        );

        let result = self.inner.update_user_mappings(mappings).await;
        self.log_outcome("update_user_mappings", &result, started_at);
        result
    }

    /// Replaces the full group membership of a role.
    pub async fn update_group_mappings(
        &self,
        mappings: &GroupRoleMappings,
    ) -> Result<GroupMappingOutcome> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            role_id = %mappings.role_id,
            groups = mappings.groups.len(),
            "Updating group role mappings"
        );

        let result = self.inner.update_group_mappings(mappings).await;
        self.log_outcome("update_group_mappings", &result, started_at);
        result
    }

    fn log_outcome<T>(
        &self,
        operation: &'static str,
        result: &Result<SyncOutcome<T>>,
        started_at: Instant,
    ) {
        let elapsed = started_at.elapsed();

        match result {
            Ok(outcome) => {
                let outcome = match outcome {
                    SyncOutcome::Applied(_) => "applied",
                    SyncOutcome::Rejected(_) => "rejected",
                    SyncOutcome::Failed(_) => "failed",
                };
                tracing::debug!(
                    target: TRACING_TARGET,
                    operation,
                    outcome,
                    elapsed_ms = elapsed.as_millis(),
                    "Role-mapping operation completed"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    operation,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Role-mapping operation error"
                );
            }
        }
    }
}
