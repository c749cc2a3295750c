use std::collections::BTreeSet;

use async_trait::async_trait;

use rolegate_core::AppResult;
use rolegate_domain::{PermissionCode, Role, RoleId};

/// Input payload for creating roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Unique role name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Initial grants; codes missing from the catalog are dropped.
    pub permissions: BTreeSet<PermissionCode>,
}

/// Input payload for updating roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// New name, unchanged when `None`.
    pub name: Option<String>,
    /// New description, unchanged when `None`; an empty string clears it.
    pub description: Option<String>,
    /// Replacement grants, unchanged when `None`.
    pub permissions: Option<BTreeSet<PermissionCode>>,
}

/// Repository port for roles and their grants.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Creates an active role. Fails with `DuplicateName` when the name is taken.
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role>;

    /// Finds a role by id.
    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>>;

    /// Finds a role by its unique name.
    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// Lists all roles ordered by name.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Updates name, description and optionally grants in one unit.
    async fn update_role(&self, role_id: RoleId, input: UpdateRoleInput) -> AppResult<Role>;

    /// Atomically replaces the role grants with `codes ∩ catalog`.
    async fn replace_role_permissions(
        &self,
        role_id: RoleId,
        codes: &BTreeSet<PermissionCode>,
    ) -> AppResult<Role>;

    /// Flips the active flag.
    ///
    /// Deactivation fails with `HasActiveDependents` when an active principal still
    /// references the role; the check and the flip are one atomic unit.
    async fn toggle_role_active(&self, role_id: RoleId) -> AppResult<Role>;
}
