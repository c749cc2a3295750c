use rolegate_domain::PermissionTreeNode;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One node of the permission tree.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-tree-node-response.ts"
)]
pub struct PermissionTreeNodeResponse {
    pub label: String,
    pub code: String,
    pub children: Vec<PermissionTreeNodeResponse>,
}

impl From<PermissionTreeNode> for PermissionTreeNodeResponse {
    fn from(value: PermissionTreeNode) -> Self {
        Self {
            label: value.label,
            code: value.code,
            children: value.children.into_iter().map(Self::from).collect(),
        }
    }
}

/// Effective permission set of the calling principal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/effective-permissions-response.ts"
)]
pub struct EffectivePermissionsResponse {
    pub subject: String,
    pub is_superuser: bool,
    pub role_id: Option<String>,
    pub permissions: Vec<String>,
}

/// Incoming payload for an authorization check.
///
/// Either `permission` or `resource` (with an optional `operation`) is set.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/authorization-check-request.ts"
)]
pub struct AuthorizationCheckRequest {
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
}

/// Outcome of an authorization check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/authorization-check-response.ts"
)]
pub struct AuthorizationCheckResponse {
    pub allowed: bool,
    pub required_permission: Option<String>,
}
