//! The provisioning workflow engine.

use portside_core::descriptor::{DataProduct, ResolvedPorts};
use portside_core::naming;
use portside_core::status::ValidationResult;
use portside_hasura::types::{
    AddSourceOutcome, CreatePermissionOutcome, TrackTableOutcome, UntrackTableOutcome,
};
use portside_hasura::MetadataService;
use portside_rolemap::types::{GroupRoleMappings, Role, SyncOutcome, UserRoleMappings};
use portside_rolemap::RoleMappingService;

use crate::config::WarehouseConfig;
use crate::{derive, Result, TRACING_TARGET};

/// Terminal outcome of a workflow operation.
///
/// `Invalid` means the descriptor failed naming validation and no remote
/// was touched. `Failed` names the first step whose remote outcome was not
/// acceptable; it never echoes raw remote payloads. Transport and protocol
/// failures are not outcomes, they propagate as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The workflow converged on the desired state.
    Completed(String),
    /// The workflow stopped at the named step.
    Failed(String),
    /// Naming validation failed; the violations, in rule order.
    Invalid(Vec<String>),
}

/// The workflow engine composing the two gateways.
///
/// Holds injected service handles plus the warehouse connection parameters;
/// cloning is cheap. Remote outcomes that report already-applied state are
/// collapsed into success here and nowhere else, which keeps the
/// idempotence rules of the workflow in one place.
#[derive(Debug, Clone)]
pub struct Provisioner {
    hasura: MetadataService,
    role_mapper: RoleMappingService,
    warehouse: WarehouseConfig,
}

impl Provisioner {
    /// Creates a workflow engine over the given services.
    pub fn new(
        hasura: MetadataService,
        role_mapper: RoleMappingService,
        warehouse: WarehouseConfig,
    ) -> Self {
        Self {
            hasura,
            role_mapper,
            warehouse,
        }
    }

    /// Validates the generated identifiers of the gateway port.
    ///
    /// Pure; performs no remote calls.
    pub fn validate(&self, product: &DataProduct, ports: &ResolvedPorts) -> ValidationResult {
        match naming::validate_naming(product, &ports.graphql_port) {
            Ok(()) => ValidationResult::valid(),
            Err(errors) => ValidationResult::invalid(errors),
        }
    }

    /// Provisions the gateway port: data source, tracked table, read role,
    /// select permission.
    ///
    /// Single attempt per step with early abort and no rollback. A partial
    /// failure leaves earlier steps applied; re-running is safe because
    /// already-applied outcomes count as success.
    pub async fn provision(
        &self,
        product: &DataProduct,
        ports: &ResolvedPorts,
    ) -> Result<WorkflowOutcome> {
        if let Err(errors) = naming::validate_naming(product, &ports.graphql_port) {
            return Ok(WorkflowOutcome::Invalid(errors));
        }

        let (source, table) = derive::derive_configs(&self.warehouse, product, ports)?;

        tracing::info!(
            target: TRACING_TARGET,
            component_id = %ports.graphql_port.id,
            source_name = %source.name,
            "Provisioning output port"
        );

        match self.hasura.add_source(&source).await? {
            AddSourceOutcome::Success | AddSourceOutcome::AlreadyExists => {}
            AddSourceOutcome::Failure => {
                return Ok(WorkflowOutcome::Failed(
                    "Unable to add data source; please check with the platform team.".to_string(),
                ));
            }
        }

        match self.hasura.track_table(&table).await? {
            TrackTableOutcome::Success | TrackTableOutcome::AlreadyTracked => {}
            TrackTableOutcome::Failure => {
                return Ok(WorkflowOutcome::Failed(
                    "Unable to track table; please check with the platform team.".to_string(),
                ));
            }
        }

        let role_id = naming::role_id(product, &ports.graphql_port);
        let role = Role {
            role_id: role_id.clone(),
            component_id: ports.graphql_port.id.clone(),
            graphql_root_field_names: vec![
                table.select_root_field.clone(),
                table.select_by_pk_root_field.clone(),
                table.select_aggregate_root_field.clone(),
                table.select_stream_root_field.clone(),
            ],
        };

        match self.role_mapper.create_role(&role).await? {
            SyncOutcome::Applied(_) => {}
            SyncOutcome::Rejected(_) | SyncOutcome::Failed(_) => {
                return Ok(WorkflowOutcome::Failed(
                    "Unable to create role; please check with the platform team.".to_string(),
                ));
            }
        }

        match self.hasura.create_select_permission(&table, &role_id).await? {
            CreatePermissionOutcome::Success | CreatePermissionOutcome::AlreadyExists => {}
            CreatePermissionOutcome::Failure => {
                return Ok(WorkflowOutcome::Failed(
                    "Unable to create permissions for table; please check with the platform team."
                        .to_string(),
                ));
            }
        }

        Ok(WorkflowOutcome::Completed("Provisioning completed".to_string()))
    }

    /// Unprovisions the gateway port by untracking its table.
    ///
    /// The data source, role and mappings stay in place: the source is
    /// shared by sibling ports of the same product, and stale roles cause
    /// no harm once the table is gone.
    pub async fn unprovision(
        &self,
        product: &DataProduct,
        ports: &ResolvedPorts,
    ) -> Result<WorkflowOutcome> {
        if let Err(errors) = naming::validate_naming(product, &ports.graphql_port) {
            return Ok(WorkflowOutcome::Invalid(errors));
        }

        let (_, table) = derive::derive_configs(&self.warehouse, product, ports)?;

        tracing::info!(
            target: TRACING_TARGET,
            component_id = %ports.graphql_port.id,
            "Unprovisioning output port"
        );

        match self.hasura.untrack_table(&table).await? {
            UntrackTableOutcome::Success | UntrackTableOutcome::NotTracked => {}
            UntrackTableOutcome::Failure => {
                return Ok(WorkflowOutcome::Failed(
                    "Unable to untrack table; please check with the platform team.".to_string(),
                ));
            }
        }

        Ok(WorkflowOutcome::Completed("Unprovisioning completed".to_string()))
    }

    /// Replaces the role's membership with the given subject references.
    ///
    /// References are partitioned by their `user:` / `group:` prefix; any
    /// other prefix is dropped without error. Both lists are pushed as full
    /// replacements, so an absent subject loses access.
    pub async fn update_acl(
        &self,
        product: &DataProduct,
        ports: &ResolvedPorts,
        refs: &[String],
    ) -> Result<WorkflowOutcome> {
        if let Err(errors) = naming::validate_naming(product, &ports.graphql_port) {
            return Ok(WorkflowOutcome::Invalid(errors));
        }

        let role_id = naming::role_id(product, &ports.graphql_port);
        let users: Vec<String> = refs
            .iter()
            .filter(|r| r.starts_with("user:"))
            .cloned()
            .collect();
        let groups: Vec<String> = refs
            .iter()
            .filter(|r| r.starts_with("group:"))
            .cloned()
            .collect();

        tracing::info!(
            target: TRACING_TARGET,
            role_id = %role_id,
            users = users.len(),
            groups = groups.len(),
            dropped = refs.len() - users.len() - groups.len(),
            "Updating role membership"
        );

        let user_mappings = UserRoleMappings {
            role_id: role_id.clone(),
            users,
        };
        match self.role_mapper.update_user_mappings(&user_mappings).await? {
            SyncOutcome::Applied(_) => {}
            SyncOutcome::Rejected(_) | SyncOutcome::Failed(_) => {
                return Ok(WorkflowOutcome::Failed(
                    "Unable to update user role mappings; please check with the platform team."
                        .to_string(),
                ));
            }
        }

        let group_mappings = GroupRoleMappings { role_id, groups };
        match self
            .role_mapper
            .update_group_mappings(&group_mappings)
            .await?
        {
            SyncOutcome::Applied(_) => {}
            SyncOutcome::Rejected(_) | SyncOutcome::Failed(_) => {
                return Ok(WorkflowOutcome::Failed(
                    "Unable to update group role mappings; please check with the platform team."
                        .to_string(),
                ));
            }
        }

        Ok(WorkflowOutcome::Completed("Update ACL completed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use portside_hasura::mock::MockMetadataProvider;
    use portside_rolemap::mock::{MockResponse, MockRoleMappingProvider};
    use serde_json::json;

    use super::*;

    const GATEWAY_PORT_ID: &str = "urn:dmb:cmp:healthcare:vaccinations:0:hasura-output-port";
    const SOURCE_PORT_ID: &str = "urn:dmb:cmp:healthcare:vaccinations:0:snowflake-output-port";

    fn component(id: &str, name: &str, depends_on: Vec<&str>, specific: serde_json::Value) -> serde_json::Value {
        let gateway = name.contains("Hasura");
        let technology = if gateway { "Hasura" } else { "Snowflake" };
        let port_type = if gateway { "GraphQL" } else { "SQL" };

        json!({
            "id": id,
            "name": name,
            "fullyQualifiedName": format!("healthcare.vaccinations.0.{name}"),
            "description": "Vaccinations data",
            "kind": "outputport",
            "version": "0.1.0",
            "infrastructureTemplateId": "urn:dmb:itm:hasura-provisioner:0",
            "useCaseTemplateId": "urn:dmb:utm:hasura-template:0.0.0",
            "dependsOn": depends_on,
            "platform": "Snowflake",
            "technology": technology,
            "outputPortType": port_type,
            "creationDate": "2023-03-02T15:32:00Z",
            "startDate": "2023-03-02T15:32:00Z",
            "specific": specific,
        })
    }

    fn fixture() -> (DataProduct, ResolvedPorts) {
        let product: DataProduct = serde_json::from_value(json!({
            "id": "urn:dmb:dp:healthcare:vaccinations:0",
            "name": "Vaccinations",
            "domain": "healthcare",
            "environment": "development",
            "version": "0.1.0",
            "dataProductOwner": "user:owner_example.com",
            "devGroup": "group:dev",
            "ownerGroup": "group:owners",
            "specific": {},
            "components": [
                component(GATEWAY_PORT_ID, "Hasura Output Port", vec![SOURCE_PORT_ID], json!({
                    "customTableName": "healthcare_vaccinations_0_hasuraoutputport_vaccinations",
                    "select": "healthcare_vaccinations_0_hasuraoutputport_select",
                    "selectByPk": "healthcare_vaccinations_0_hasuraoutputport_select_by_pk",
                    "selectAggregate": "healthcare_vaccinations_0_hasuraoutputport_select_aggregate",
                    "selectStream": "healthcare_vaccinations_0_hasuraoutputport_select_stream",
                })),
                component(SOURCE_PORT_ID, "Snowflake Output Port", vec![], json!({
                    "database": "HEALTHCARE",
                    "schema": "VACCINATIONS_0",
                    "viewName": "vaccinations_view",
                })),
            ],
        }))
        .unwrap();

        let ports = portside_core::descriptor::resolve(&product, GATEWAY_PORT_ID).unwrap();
        (product, ports)
    }

    fn warehouse() -> WarehouseConfig {
        WarehouseConfig {
            host: "account.snowflakecomputing.com".to_string(),
            user: "svc_gateway".to_string(),
            password: "secret".to_string(),
            role: "GATEWAY_ROLE".to_string(),
            warehouse: "COMPUTE_WH".to_string(),
        }
    }

    fn provisioner(
        hasura: MockMetadataProvider,
        role_mapper: MockRoleMappingProvider,
    ) -> Provisioner {
        Provisioner::new(
            MetadataService::new(hasura),
            RoleMappingService::new(role_mapper),
            warehouse(),
        )
    }

    #[tokio::test]
    async fn test_provision_happy_path() {
        let hasura = MockMetadataProvider::default();
        let role_mapper = MockRoleMappingProvider::default();
        let calls = hasura.calls();
        let recorder = role_mapper.recorder();
        let engine = provisioner(hasura, role_mapper);

        let (product, ports) = fixture();
        let outcome = engine.provision(&product, &ports).await.unwrap();

        assert_eq!(
            outcome,
            WorkflowOutcome::Completed("Provisioning completed".to_string())
        );
        assert_eq!(calls.add_source(), 1);
        assert_eq!(calls.track_table(), 1);
        assert_eq!(calls.create_select_permission(), 1);
        assert_eq!(recorder.create_role(), 1);

        let role = recorder.last_role().unwrap();
        assert_eq!(role.role_id, "healthcare_vaccinations_0_hasuraoutputport_role");
        assert_eq!(role.component_id, GATEWAY_PORT_ID);
        assert_eq!(role.graphql_root_field_names.len(), 4);
    }

    #[tokio::test]
    async fn test_provision_is_idempotent_on_already_applied_state() {
        let hasura = MockMetadataProvider::default()
            .with_add_source(AddSourceOutcome::AlreadyExists)
            .with_track_table(TrackTableOutcome::AlreadyTracked)
            .with_create_select_permission(CreatePermissionOutcome::AlreadyExists);
        let engine = provisioner(hasura, MockRoleMappingProvider::default());

        let (product, ports) = fixture();
        let outcome = engine.provision(&product, &ports).await.unwrap();

        assert_eq!(
            outcome,
            WorkflowOutcome::Completed("Provisioning completed".to_string())
        );
    }

    #[tokio::test]
    async fn test_provision_add_source_failure_short_circuits() {
        let hasura = MockMetadataProvider::default().with_add_source(AddSourceOutcome::Failure);
        let role_mapper = MockRoleMappingProvider::default();
        let calls = hasura.calls();
        let recorder = role_mapper.recorder();
        let engine = provisioner(hasura, role_mapper);

        let (product, ports) = fixture();
        let outcome = engine.provision(&product, &ports).await.unwrap();

        assert_eq!(
            outcome,
            WorkflowOutcome::Failed(
                "Unable to add data source; please check with the platform team.".to_string()
            )
        );
        assert_eq!(calls.add_source(), 1);
        assert_eq!(calls.track_table(), 0);
        assert_eq!(calls.create_select_permission(), 0);
        assert_eq!(recorder.create_role(), 0);
    }

    #[tokio::test]
    async fn test_provision_role_rejection_stops_before_permission() {
        let hasura = MockMetadataProvider::default();
        let role_mapper = MockRoleMappingProvider::default()
            .with_create_role(MockResponse::Rejected(vec!["role id too long".to_string()]));
        let calls = hasura.calls();
        let engine = provisioner(hasura, role_mapper);

        let (product, ports) = fixture();
        let outcome = engine.provision(&product, &ports).await.unwrap();

        assert_eq!(
            outcome,
            WorkflowOutcome::Failed(
                "Unable to create role; please check with the platform team.".to_string()
            )
        );
        assert_eq!(calls.track_table(), 1);
        assert_eq!(calls.create_select_permission(), 0);
    }

    #[tokio::test]
    async fn test_provision_invalid_naming_makes_no_remote_calls() {
        let hasura = MockMetadataProvider::default();
        let role_mapper = MockRoleMappingProvider::default();
        let calls = hasura.calls();
        let recorder = role_mapper.recorder();
        let engine = provisioner(hasura, role_mapper);

        let (product, mut ports) = fixture();
        ports.graphql_port.specific.select = "wrong_prefix_select".to_string();

        let outcome = engine.provision(&product, &ports).await.unwrap();

        match outcome {
            WorkflowOutcome::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("select"));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert_eq!(calls.add_source(), 0);
        assert_eq!(recorder.create_role(), 0);
    }

    #[tokio::test]
    async fn test_unprovision_only_untracks() {
        let hasura = MockMetadataProvider::default();
        let role_mapper = MockRoleMappingProvider::default();
        let calls = hasura.calls();
        let recorder = role_mapper.recorder();
        let engine = provisioner(hasura, role_mapper);

        let (product, ports) = fixture();
        let outcome = engine.unprovision(&product, &ports).await.unwrap();

        assert_eq!(
            outcome,
            WorkflowOutcome::Completed("Unprovisioning completed".to_string())
        );
        assert_eq!(calls.untrack_table(), 1);
        assert_eq!(calls.drop_source(), 0);
        assert_eq!(calls.drop_select_permission(), 0);
        assert_eq!(recorder.update_user_mappings(), 0);
    }

    #[tokio::test]
    async fn test_unprovision_not_tracked_counts_as_success() {
        let hasura =
            MockMetadataProvider::default().with_untrack_table(UntrackTableOutcome::NotTracked);
        let engine = provisioner(hasura, MockRoleMappingProvider::default());

        let (product, ports) = fixture();
        let outcome = engine.unprovision(&product, &ports).await.unwrap();

        assert_eq!(
            outcome,
            WorkflowOutcome::Completed("Unprovisioning completed".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_acl_partitions_refs_and_drops_unknown_prefixes() {
        let role_mapper = MockRoleMappingProvider::default();
        let recorder = role_mapper.recorder();
        let engine = provisioner(MockMetadataProvider::default(), role_mapper);

        let (product, ports) = fixture();
        let refs = vec![
            "user:alice_example.com".to_string(),
            "group:engineering".to_string(),
            "bogus:thing".to_string(),
            "user:bob_example.com".to_string(),
        ];
        let outcome = engine.update_acl(&product, &ports, &refs).await.unwrap();

        assert_eq!(
            outcome,
            WorkflowOutcome::Completed("Update ACL completed".to_string())
        );

        let users = recorder.last_user_mappings().unwrap();
        assert_eq!(users.role_id, "healthcare_vaccinations_0_hasuraoutputport_role");
        assert_eq!(users.users, vec!["user:alice_example.com", "user:bob_example.com"]);

        let groups = recorder.last_group_mappings().unwrap();
        assert_eq!(groups.groups, vec!["group:engineering"]);
    }

    #[tokio::test]
    async fn test_update_acl_user_failure_skips_group_update() {
        let role_mapper = MockRoleMappingProvider::default()
            .with_update_user_mappings(MockResponse::Failed("mapping store down".to_string()));
        let recorder = role_mapper.recorder();
        let engine = provisioner(MockMetadataProvider::default(), role_mapper);

        let (product, ports) = fixture();
        let outcome = engine
            .update_acl(&product, &ports, &["user:alice".to_string()])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            WorkflowOutcome::Failed(
                "Unable to update user role mappings; please check with the platform team."
                    .to_string()
            )
        );
        assert_eq!(recorder.update_group_mappings(), 0);
    }

    #[test]
    fn test_validate_reports_all_violations() {
        let engine = provisioner(
            MockMetadataProvider::default(),
            MockRoleMappingProvider::default(),
        );

        let (product, mut ports) = fixture();
        ports.graphql_port.specific.custom_table_name = "bad_table".to_string();
        ports.graphql_port.specific.select_stream = "bad_stream".to_string();

        let result = engine.validate(&product, &ports);
        assert!(!result.valid);
        assert_eq!(result.error.unwrap().errors.len(), 2);
    }

}
