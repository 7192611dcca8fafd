//! Wire types and outcomes of the role-mapping API.

use serde::{Deserialize, Serialize};

/// An access-control role in the gateway, mapped 1:1 to a generated role
/// id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Deterministic role id, `<tenant prefix>role`.
    pub role_id: String,
    /// Id of the output-port component the role belongs to.
    pub component_id: String,
    /// Root field names the role grants read access to.
    pub graphql_root_field_names: Vec<String>,
}

/// Full desired user membership of a role.
///
/// Replacement semantics: the remote drops any user not in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleMappings {
    /// The role the mapping applies to.
    pub role_id: String,
    /// Complete desired user list, `user:` references.
    pub users: Vec<String>,
}

/// Full desired group membership of a role.
///
/// Replacement semantics: the remote drops any group not in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRoleMappings {
    /// The role the mapping applies to.
    pub role_id: String,
    /// Complete desired group list, `group:` references.
    pub groups: Vec<String>,
}

/// Structured 400 payload of the role-mapping API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingValidationError {
    /// One message per rejected aspect of the request.
    pub errors: Vec<String>,
}

/// Structured 500 payload of the role-mapping API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSystemError {
    /// The remote's error message.
    pub error: String,
}

/// Outcome of a role-mapping `PUT`, generic over the echoed descriptor.
///
/// The remote answers 200 with the applied descriptor, 400 with a
/// validation error and 500 with a system error; those three shapes map
/// onto the three variants. Any other status never reaches this type — it
/// propagates as a hard protocol error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome<T> {
    /// The remote applied and echoed the descriptor.
    Applied(T),
    /// The remote rejected the descriptor as invalid.
    Rejected(MappingValidationError),
    /// The remote failed internally.
    Failed(MappingSystemError),
}

impl<T> SyncOutcome<T> {
    /// Returns the applied descriptor, if the outcome is `Applied`.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            _ => None,
        }
    }
}

/// Outcome of creating a role.
pub type RoleOutcome = SyncOutcome<Role>;

/// Outcome of replacing a role's user membership.
pub type UserMappingOutcome = SyncOutcome<UserRoleMappings>;

/// Outcome of replacing a role's group membership.
pub type GroupMappingOutcome = SyncOutcome<GroupRoleMappings>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_shape() {
        let role = Role {
            role_id: "dom_dp_0_op_role".to_string(),
            component_id: "urn:dmb:cmp:dom:dp:0:op".to_string(),
            graphql_root_field_names: vec!["dom_dp_0_op_select".to_string()],
        };

        let json = serde_json::to_value(&role).unwrap();
        assert_eq!(json["role_id"], "dom_dp_0_op_role");
        assert_eq!(json["graphql_root_field_names"][0], "dom_dp_0_op_select");
    }

    #[test]
    fn test_sync_outcome_applied() {
        let outcome: RoleOutcome = SyncOutcome::Rejected(MappingValidationError {
            errors: vec!["role id too long".to_string()],
        });
        assert!(outcome.applied().is_none());
    }
}
