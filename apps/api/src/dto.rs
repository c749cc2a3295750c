mod audit;
mod authorization;
mod common;
mod roles;

pub use audit::AuditLogEntryResponse;
pub use authorization::{
    AuthorizationCheckRequest, AuthorizationCheckResponse, EffectivePermissionsResponse,
    PermissionTreeNodeResponse,
};
pub use common::HealthResponse;
pub use roles::{
    AssignRoleRequest, CreateRoleRequest, PrincipalResponse, RolePermissionsResponse,
    RoleResponse, SetRolePermissionsRequest, SetRolePermissionsResponse, UpdateRoleRequest,
};

#[cfg(test)]
mod tests {
    use rolegate_application::AuditLogEntry;
    use rolegate_domain::{PermissionCode, PermissionTreeNode, Role, RoleId};
    use serde_json::json;

    use super::{
        AuditLogEntryResponse, AuthorizationCheckRequest, CreateRoleRequest,
        PermissionTreeNodeResponse, RoleResponse, UpdateRoleRequest,
    };

    #[test]
    fn role_response_lists_codes_in_order() {
        let Ok(mut role) = Role::new(RoleId::new(), "Editor", Some("Edits things".to_owned()))
        else {
            panic!("role should be valid");
        };
        role.replace_permissions(
            [
                PermissionCode::from_static("roles.update"),
                PermissionCode::from_static("roles.list"),
            ]
            .into_iter()
            .collect(),
        );

        let response = RoleResponse::from(role);
        assert_eq!(response.name, "Editor");
        assert_eq!(response.permissions, vec!["roles.list", "roles.update"]);
        assert!(response.is_active);
    }

    #[test]
    fn create_role_request_defaults_permissions() {
        let request: Result<CreateRoleRequest, _> =
            serde_json::from_value(json!({ "name": "Viewer" }));
        let Ok(request) = request else {
            panic!("request should deserialize");
        };
        assert!(request.permissions.is_empty());
        assert!(request.description.is_none());
    }

    #[test]
    fn update_role_request_keeps_absent_fields_absent() {
        let request: Result<UpdateRoleRequest, _> =
            serde_json::from_value(json!({ "description": "" }));
        let Ok(request) = request else {
            panic!("request should deserialize");
        };
        assert!(request.name.is_none());
        assert!(request.permissions.is_none());
        assert_eq!(request.description.as_deref(), Some(""));
    }

    #[test]
    fn check_request_accepts_both_shapes() {
        let by_operation: Result<AuthorizationCheckRequest, _> =
            serde_json::from_value(json!({ "resource": "roles", "operation": "list" }));
        assert!(by_operation.is_ok());

        let by_code: Result<AuthorizationCheckRequest, _> =
            serde_json::from_value(json!({ "permission": "roles.list" }));
        assert!(by_code.is_ok());
    }

    #[test]
    fn tree_response_is_recursive() {
        let node = PermissionTreeNode {
            label: "Roles".to_owned(),
            code: "roles".to_owned(),
            children: vec![PermissionTreeNode {
                label: "List roles".to_owned(),
                code: "roles.list".to_owned(),
                children: Vec::new(),
            }],
        };

        let response = PermissionTreeNodeResponse::from(node);
        assert_eq!(response.children.len(), 1);
        assert_eq!(response.children[0].code, "roles.list");
    }

    #[test]
    fn audit_entry_serializes_snake_case_fields() {
        let entry = AuditLogEntryResponse::from(AuditLogEntry {
            event_id: "1".to_owned(),
            subject: "alice".to_owned(),
            action: "security.role.created".to_owned(),
            resource_type: "role".to_owned(),
            resource_id: "abc".to_owned(),
            detail: None,
            created_at: "2026-01-01T00:00:00+00:00".to_owned(),
        });

        let value = serde_json::to_value(&entry).unwrap_or_default();
        assert_eq!(value["resource_type"], "role");
        assert_eq!(value["detail"], serde_json::Value::Null);
    }
}
