use rolegate_domain::{Principal, Role};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Incoming payload for full and partial role updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-role-request.ts"
)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub permissions: Vec<String>,
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            description: value.description().map(str::to_owned),
            is_active: value.is_active(),
            permissions: value
                .permissions()
                .iter()
                .map(|code| code.as_str().to_owned())
                .collect(),
        }
    }
}

/// Permission codes granted by a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-permissions-response.ts"
)]
pub struct RolePermissionsResponse {
    pub role_id: String,
    pub permissions: Vec<String>,
}

/// Incoming payload replacing the codes granted by a role.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-role-permissions-request.ts"
)]
pub struct SetRolePermissionsRequest {
    pub permissions: Vec<String>,
}

/// Number of codes applied after filtering unknown ones.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-role-permissions-response.ts"
)]
pub struct SetRolePermissionsResponse {
    pub role_id: String,
    pub applied: u32,
}

/// Incoming payload for role assignment. A `null` role clears the assignment.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-role-request.ts"
)]
pub struct AssignRoleRequest {
    pub role_id: Option<String>,
}

/// API representation of a principal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/principal-response.ts"
)]
pub struct PrincipalResponse {
    pub subject: String,
    pub is_superuser: bool,
    pub is_active: bool,
    pub role_id: Option<String>,
}

impl From<Principal> for PrincipalResponse {
    fn from(value: Principal) -> Self {
        Self {
            subject: value.display_subject().to_owned(),
            is_superuser: value.is_superuser(),
            is_active: value.is_active(),
            role_id: value.role_id().map(|role_id| role_id.to_string()),
        }
    }
}
