use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a role is created.
    RoleCreated,
    /// Emitted when a role name or description changes.
    RoleUpdated,
    /// Emitted when a role permission set is replaced.
    RolePermissionsReplaced,
    /// Emitted when a role is activated or deactivated.
    RoleStatusToggled,
    /// Emitted when a principal's role changes.
    PrincipalRoleAssigned,
    /// Emitted when a principal is enabled or disabled.
    PrincipalStatusToggled,
    /// Emitted when the permission catalog is seeded.
    CatalogSeeded,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleCreated => "security.role.created",
            Self::RoleUpdated => "security.role.updated",
            Self::RolePermissionsReplaced => "security.role.permissions_replaced",
            Self::RoleStatusToggled => "security.role.status_toggled",
            Self::PrincipalRoleAssigned => "security.principal.role_assigned",
            Self::PrincipalStatusToggled => "security.principal.status_toggled",
            Self::CatalogSeeded => "security.catalog.seeded",
        }
    }
}
