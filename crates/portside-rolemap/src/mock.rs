//! Mock role-mapping provider for testing.
//!
//! The mock answers every operation with a scripted response mode, counts
//! invocations and records the last descriptor each operation received, so
//! workflow tests can assert both the terminal state and the exact
//! membership lists that were pushed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::types::{
    GroupMappingOutcome, GroupRoleMappings, MappingSystemError, MappingValidationError, Role,
    RoleOutcome, SyncOutcome, UserMappingOutcome, UserRoleMappings,
};
use crate::{Result, RoleMappingProvider};

/// Scripted response mode for a mock operation.
///
/// `Applied` echoes the received descriptor, matching the remote's 200
/// behavior; the other modes carry a canned payload.
#[derive(Debug, Clone, Default)]
pub enum MockResponse {
    /// Echo the received descriptor as applied.
    #[default]
    Applied,
    /// Reject with the given validation errors.
    Rejected(Vec<String>),
    /// Fail with the given system error message.
    Failed(String),
}

impl MockResponse {
    fn outcome<T>(&self, descriptor: T) -> SyncOutcome<T> {
        match self {
            Self::Applied => SyncOutcome::Applied(descriptor),
            Self::Rejected(errors) => SyncOutcome::Rejected(MappingValidationError {
                errors: errors.clone(),
            }),
            Self::Failed(error) => SyncOutcome::Failed(MappingSystemError {
                error: error.clone(),
            }),
        }
    }
}

/// Shared record of what the mock saw: invocation counters plus the last
/// descriptor per operation.
#[derive(Debug, Default)]
pub struct MappingRecorder {
    create_role: AtomicUsize,
    update_user_mappings: AtomicUsize,
    update_group_mappings: AtomicUsize,
    last_role: Mutex<Option<Role>>,
    last_user_mappings: Mutex<Option<UserRoleMappings>>,
    last_group_mappings: Mutex<Option<GroupRoleMappings>>,
}

impl MappingRecorder {
    /// Number of `create_role` invocations.
    pub fn create_role(&self) -> usize {
        self.create_role.load(Ordering::SeqCst)
    }

    /// Number of `update_user_mappings` invocations.
    pub fn update_user_mappings(&self) -> usize {
        self.update_user_mappings.load(Ordering::SeqCst)
    }

    /// Number of `update_group_mappings` invocations.
    pub fn update_group_mappings(&self) -> usize {
        self.update_group_mappings.load(Ordering::SeqCst)
    }

    /// The last role pushed through `create_role`.
    pub fn last_role(&self) -> Option<Role> {
        self.last_role.lock().ok()?.clone()
    }

    /// The last user membership pushed through `update_user_mappings`.
    pub fn last_user_mappings(&self) -> Option<UserRoleMappings> {
        self.last_user_mappings.lock().ok()?.clone()
    }

    /// The last group membership pushed through `update_group_mappings`.
    pub fn last_group_mappings(&self) -> Option<GroupRoleMappings> {
        self.last_group_mappings.lock().ok()?.clone()
    }
}

/// Mock implementation of [`RoleMappingProvider`] with scripted responses.
#[derive(Debug, Clone, Default)]
pub struct MockRoleMappingProvider {
    create_role_response: MockResponse,
    update_users_response: MockResponse,
    update_groups_response: MockResponse,
    recorder: Arc<MappingRecorder>,
}

impl MockRoleMappingProvider {
    /// Returns a handle to the recorded invocations.
    pub fn recorder(&self) -> Arc<MappingRecorder> {
        Arc::clone(&self.recorder)
    }

    /// Scripts the `create_role` response.
    #[must_use]
    pub fn with_create_role(mut self, response: MockResponse) -> Self {
        self.create_role_response = response;
        self
    }

    /// Scripts the `update_user_mappings` response.
    #[must_use]
    pub fn with_update_user_mappings(mut self, response: MockResponse) -> Self {
        self.update_users_response = response;
        self
    }

    /// Scripts the `update_group_mappings` response.
    #[must_use]
    pub fn with_update_group_mappings(mut self, response: MockResponse) -> Self {
        self.update_groups_response = response;
        self
    }
}

#[async_trait::async_trait]
impl RoleMappingProvider for MockRoleMappingProvider {
    async fn create_role(&self, role: &Role) -> Result<RoleOutcome> {
        self.recorder.create_role.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.recorder.last_role.lock() {
            *last = Some(role.clone());
        }
        Ok(self.create_role_response.outcome(role.clone()))
    }

    async fn update_user_mappings(
        &self,
        mappings: &UserRoleMappings,
    ) -> Result<UserMappingOutcome> {
        self.recorder
            .update_user_mappings
            .fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.recorder.last_user_mappings.lock() {
            *last = Some(mappings.clone());
        }
        Ok(self.update_users_response.outcome(mappings.clone()))
    }

    async fn update_group_mappings(
        &self,
        mappings: &GroupRoleMappings,
    ) -> Result<GroupMappingOutcome> {
        self.recorder
            .update_group_mappings
            .fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.recorder.last_group_mappings.lock() {
            *last = Some(mappings.clone());
        }
        Ok(self.update_groups_response.outcome(mappings.clone()))
    }
}
