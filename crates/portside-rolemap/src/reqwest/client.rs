//! Reqwest-based HTTP client for the role-mapping API.

use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{RoleMapperConfig, TRACING_TARGET};
use crate::types::{
    GroupMappingOutcome, GroupRoleMappings, MappingSystemError, MappingValidationError, Role,
    RoleOutcome, SyncOutcome, UserMappingOutcome, UserRoleMappings,
};
use crate::{RoleMappingProvider, RoleMappingService};

/// Inner client that holds the HTTP client and endpoints.
struct RoleMapperClientInner {
    http: Client,
    roles_url: String,
    user_roles_url: String,
    group_roles_url: String,
}

/// Reqwest-based client for the role-mapping API.
///
/// This client implements the [`RoleMappingProvider`] trait. All three
/// operations share one status contract: 200 echoes the applied descriptor,
/// 400 carries a structured validation error, 500 a structured system error.
/// Anything else propagates as a hard protocol error.
#[derive(Clone)]
pub struct RoleMapperClient {
    inner: Arc<RoleMapperClientInner>,
}

impl std::fmt::Debug for RoleMapperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleMapperClient")
            .field("roles_url", &self.inner.roles_url)
            .finish_non_exhaustive()
    }
}

impl RoleMapperClient {
    /// Creates a new client from the given configuration.
    pub fn new(config: RoleMapperConfig) -> crate::Result<Self> {
        let base = config.base_url();
        let roles_url = format!("{base}v1/roles");
        let user_roles_url = format!("{base}v1/user_roles");
        let group_roles_url = format!("{base}v1/group_roles");

        tracing::debug!(
            target: TRACING_TARGET,
            roles_url = %roles_url,
            timeout_ms = config.effective_timeout().as_millis(),
            "Creating role-mapper client"
        );

        let http = Client::builder()
            .timeout(config.effective_timeout())
            .build()
            .map_err(|err| crate::Error::config("failed to create HTTP client").with_source(err))?;

        let inner = RoleMapperClientInner {
            http,
            roles_url,
            user_roles_url,
            group_roles_url,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Converts this client into a [`RoleMappingService`] for use with
    /// dependency injection.
    pub fn into_service(self) -> RoleMappingService {
        RoleMappingService::new(self)
    }

    /// Puts a descriptor and maps the 200/400/500 contract onto a
    /// [`SyncOutcome`]. Any other status is a protocol error.
    async fn put_descriptor<T>(&self, url: &str, descriptor: &T) -> crate::Result<SyncOutcome<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            "Calling role mapper"
        );

        let response = self
            .inner
            .http
            .put(url)
            .json(descriptor)
            .send()
            .await
            .map_err(super::Error::from)?;
        let status = response.status().as_u16();
        let body = response
            .json::<Value>()
            .await
            .map_err(super::Error::from)?;

        tracing::debug!(
            target: TRACING_TARGET,
            status,
            "Got role-mapper response"
        );

        match status {
            200 => Ok(SyncOutcome::Applied(parse_body(body)?)),
            400 => Ok(SyncOutcome::Rejected(parse_body::<MappingValidationError>(
                body,
            )?)),
            500 => Ok(SyncOutcome::Failed(parse_body::<MappingSystemError>(body)?)),
            other => Err(crate::Error::protocol(
                "role mapper",
                format!("unexpected status {other}"),
            )),
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: Value) -> crate::Result<T> {
    serde_json::from_value(body).map_err(|err| super::Error::from(err).into())
}

#[async_trait::async_trait]
impl RoleMappingProvider for RoleMapperClient {
    async fn create_role(&self, role: &Role) -> crate::Result<RoleOutcome> {
        self.put_descriptor(&self.inner.roles_url, role).await
    }

    async fn update_user_mappings(
        &self,
        mappings: &UserRoleMappings,
    ) -> crate::Result<UserMappingOutcome> {
        self.put_descriptor(&self.inner.user_roles_url, mappings)
            .await
    }

    async fn update_group_mappings(
        &self,
        mappings: &GroupRoleMappings,
    ) -> crate::Result<GroupMappingOutcome> {
        self.put_descriptor(&self.inner.group_roles_url, mappings)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_derivation() {
        let client =
            RoleMapperClient::new(RoleMapperConfig::new("http://rolemapper:8085")).unwrap();
        assert_eq!(client.inner.roles_url, "http://rolemapper:8085/v1/roles");
        assert_eq!(
            client.inner.user_roles_url,
            "http://rolemapper:8085/v1/user_roles"
        );
        assert_eq!(
            client.inner.group_roles_url,
            "http://rolemapper:8085/v1/group_roles"
        );
    }

    #[test]
    fn test_parse_body_rejects_mismatched_shape() {
        let err = parse_body::<MappingValidationError>(serde_json::json!({"message": "nope"}));
        assert!(err.is_err());
    }
}
