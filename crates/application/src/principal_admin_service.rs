use std::sync::Arc;

use rolegate_core::AppResult;
use rolegate_domain::resources::UserOperation;
use rolegate_domain::{AuditAction, Principal, Role, RoleId};

use crate::{AuditEvent, AuditRepository, AuthorizationService, PrincipalRepository, RoleRepository};

const PRINCIPAL_RESOURCE_TYPE: &str = "principal";

/// Application service for the authorization-relevant side of user accounts.
///
/// Role assignments and status toggles are committed before their audit event is
/// appended; a failed append leaves the change in place and surfaces as `Internal`.
#[derive(Clone)]
pub struct PrincipalAdminService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn PrincipalRepository>,
    role_repository: Arc<dyn RoleRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl PrincipalAdminService {
    /// Creates a new principal administration service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn PrincipalRepository>,
        role_repository: Arc<dyn RoleRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            role_repository,
            audit_repository,
        }
    }

    /// Resolves the caller from the subject vouched for by the authentication gate.
    ///
    /// Missing or unknown subjects resolve to the anonymous principal.
    pub async fn resolve_principal(&self, subject: Option<&str>) -> AppResult<Principal> {
        let Some(subject) = subject.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(Principal::anonymous());
        };

        Ok(self
            .repository
            .find_principal(subject)
            .await?
            .unwrap_or_else(Principal::anonymous))
    }

    /// Stores a principal record without authorization; used by bootstrap tooling.
    pub async fn record_principal(&self, principal: &Principal) -> AppResult<()> {
        self.repository.save_principal(principal).await
    }

    /// Lists the active roles a principal can be assigned to.
    pub async fn assignable_roles(&self, actor: &Principal) -> AppResult<Vec<Role>> {
        self.authorization_service
            .require_operation(actor, UserOperation::ListRoles)
            .await?;

        Ok(self
            .role_repository
            .list_roles()
            .await?
            .into_iter()
            .filter(Role::is_active)
            .collect())
    }

    /// Assigns or clears a principal role. Inactive roles cannot be assigned.
    pub async fn assign_role(
        &self,
        actor: &Principal,
        subject: &str,
        role_id: Option<RoleId>,
    ) -> AppResult<Principal> {
        self.authorization_service
            .require_operation(actor, UserOperation::AssignRole)
            .await?;

        let principal = self.repository.assign_role(subject, role_id).await?;
        let detail = match role_id {
            Some(role_id) => format!("assigned role '{role_id}' to '{subject}'"),
            None => format!("cleared role of '{subject}'"),
        };
        self.append_event(actor, AuditAction::PrincipalRoleAssigned, subject, detail)
            .await?;

        Ok(principal)
    }

    /// Enables or disables a principal.
    pub async fn toggle_principal_status(
        &self,
        actor: &Principal,
        subject: &str,
    ) -> AppResult<Principal> {
        self.authorization_service
            .require_operation(actor, UserOperation::ToggleActiveStatus)
            .await?;

        let principal = self.repository.toggle_principal_active(subject).await?;
        let state = if principal.is_active() {
            "active"
        } else {
            "inactive"
        };
        self.append_event(
            actor,
            AuditAction::PrincipalStatusToggled,
            subject,
            format!("principal '{subject}' is now {state}"),
        )
        .await?;

        Ok(principal)
    }

    async fn append_event(
        &self,
        actor: &Principal,
        action: AuditAction,
        subject: &str,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.display_subject().to_owned(),
                action,
                resource_type: PRINCIPAL_RESOURCE_TYPE.to_owned(),
                resource_id: subject.to_owned(),
                detail: Some(detail),
            })
            .await
    }
}

#[cfg(test)]
mod tests;
