use std::collections::BTreeSet;
use std::sync::Arc;

use rolegate_core::{AppError, AppResult};
use rolegate_domain::resources::RoleOperation;
use rolegate_domain::{AuditAction, PermissionCode, Principal, Role, RoleId};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, CreateRoleInput, RoleRepository,
    UpdateRoleInput,
};

const ROLE_RESOURCE_TYPE: &str = "role";

/// Application service for role administration.
///
/// Each mutation commits through the role repository first and only then appends its
/// audit event. The two writes are not atomic: when the append fails the change stays
/// committed and the caller receives the `Internal` error from the audit writer.
#[derive(Clone)]
pub struct RoleAdminService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn RoleRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl RoleAdminService {
    /// Creates a new role administration service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn RoleRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            audit_repository,
        }
    }

    /// Lists roles ordered by name.
    pub async fn list_roles(&self, actor: &Principal) -> AppResult<Vec<Role>> {
        self.authorization_service
            .require_operation(actor, RoleOperation::List)
            .await?;
        self.repository.list_roles().await
    }

    /// Returns one role.
    pub async fn get_role(&self, actor: &Principal, role_id: RoleId) -> AppResult<Role> {
        self.authorization_service
            .require_operation(actor, RoleOperation::Retrieve)
            .await?;
        self.find_existing(role_id).await
    }

    /// Creates an active role and emits an audit event.
    pub async fn create_role(&self, actor: &Principal, input: CreateRoleInput) -> AppResult<Role> {
        self.authorization_service
            .require_operation(actor, RoleOperation::Create)
            .await?;

        let role = self.repository.create_role(input).await?;
        self.append_event(
            actor,
            AuditAction::RoleCreated,
            &role,
            format!("created role '{}'", role.name()),
        )
        .await?;

        Ok(role)
    }

    /// Replaces role name and description, optionally the grants too.
    pub async fn update_role(
        &self,
        actor: &Principal,
        role_id: RoleId,
        input: UpdateRoleInput,
    ) -> AppResult<Role> {
        if input.name.is_none() {
            return Err(AppError::Validation(
                "role name is required for a full update".to_owned(),
            ));
        }

        self.apply_update(actor, RoleOperation::Update, role_id, input)
            .await
    }

    /// Updates only the provided role fields.
    pub async fn partial_update_role(
        &self,
        actor: &Principal,
        role_id: RoleId,
        input: UpdateRoleInput,
    ) -> AppResult<Role> {
        self.apply_update(actor, RoleOperation::PartialUpdate, role_id, input)
            .await
    }

    /// Lists the codes granted by a role.
    pub async fn role_permissions(
        &self,
        actor: &Principal,
        role_id: RoleId,
    ) -> AppResult<Vec<PermissionCode>> {
        self.authorization_service
            .require_operation(actor, RoleOperation::GetPermissions)
            .await?;

        let role = self.find_existing(role_id).await?;
        Ok(role.permissions().iter().cloned().collect())
    }

    /// Replaces the role grants and returns how many codes were applied.
    ///
    /// Codes missing from the catalog are dropped without error.
    pub async fn set_role_permissions(
        &self,
        actor: &Principal,
        role_id: RoleId,
        codes: BTreeSet<PermissionCode>,
    ) -> AppResult<usize> {
        self.authorization_service
            .require_operation(actor, RoleOperation::SetPermissions)
            .await?;

        let role = self
            .repository
            .replace_role_permissions(role_id, &codes)
            .await?;
        let applied = role.permissions().len();
        self.append_event(
            actor,
            AuditAction::RolePermissionsReplaced,
            &role,
            format!(
                "applied {applied} of {} requested permissions to role '{}'",
                codes.len(),
                role.name()
            ),
        )
        .await?;

        Ok(applied)
    }

    /// Activates or deactivates a role.
    ///
    /// Deactivation fails with `HasActiveDependents` while active principals use the role.
    pub async fn toggle_role_status(&self, actor: &Principal, role_id: RoleId) -> AppResult<Role> {
        self.authorization_service
            .require_operation(actor, RoleOperation::ToggleStatus)
            .await?;

        let role = self.repository.toggle_role_active(role_id).await?;
        let state = if role.is_active() { "active" } else { "inactive" };
        self.append_event(
            actor,
            AuditAction::RoleStatusToggled,
            &role,
            format!("role '{}' is now {state}", role.name()),
        )
        .await?;

        Ok(role)
    }

    async fn apply_update(
        &self,
        actor: &Principal,
        operation: RoleOperation,
        role_id: RoleId,
        input: UpdateRoleInput,
    ) -> AppResult<Role> {
        self.authorization_service
            .require_operation(actor, operation)
            .await?;

        let replaces_permissions = input.permissions.is_some();
        let role = self.repository.update_role(role_id, input).await?;
        self.append_event(
            actor,
            AuditAction::RoleUpdated,
            &role,
            format!("updated role '{}'", role.name()),
        )
        .await?;

        if replaces_permissions {
            self.append_event(
                actor,
                AuditAction::RolePermissionsReplaced,
                &role,
                format!(
                    "role '{}' now grants {} permissions",
                    role.name(),
                    role.permissions().len()
                ),
            )
            .await?;
        }

        Ok(role)
    }

    async fn find_existing(&self, role_id: RoleId) -> AppResult<Role> {
        self.repository
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    async fn append_event(
        &self,
        actor: &Principal,
        action: AuditAction,
        role: &Role,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.display_subject().to_owned(),
                action,
                resource_type: ROLE_RESOURCE_TYPE.to_owned(),
                resource_id: role.id().to_string(),
                detail: Some(detail),
            })
            .await
    }
}
