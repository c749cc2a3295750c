use std::sync::Arc;

use rolegate_core::{AppError, AppResult};
use rolegate_domain::{
    EffectivePermissions, PermissionCode, Principal, Requirement, ResourceOperation, decide,
};
use tracing::debug;

use crate::{ResourceRegistry, RoleRepository};

/// Application service answering allow/deny questions for explicit principals.
#[derive(Clone)]
pub struct AuthorizationService {
    role_repository: Arc<dyn RoleRepository>,
    registry: Arc<ResourceRegistry>,
}

impl AuthorizationService {
    /// Creates a new authorization service.
    #[must_use]
    pub fn new(role_repository: Arc<dyn RoleRepository>, registry: Arc<ResourceRegistry>) -> Self {
        Self {
            role_repository,
            registry,
        }
    }

    /// Returns the registry the service resolves resource names against.
    #[must_use]
    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Resolves the principal's effective permission set from live role data.
    pub async fn effective_permissions(
        &self,
        principal: &Principal,
    ) -> AppResult<EffectivePermissions> {
        if !principal.is_eligible() {
            return Ok(EffectivePermissions::None);
        }

        if principal.is_superuser() {
            return Ok(EffectivePermissions::All);
        }

        let Some(role_id) = principal.role_id() else {
            return Ok(EffectivePermissions::None);
        };

        let role = self.role_repository.find_role(role_id).await?;
        Ok(EffectivePermissions::resolve(principal, role.as_ref()))
    }

    /// Returns whether the principal holds one code.
    pub async fn has_permission(
        &self,
        principal: &Principal,
        code: &PermissionCode,
    ) -> AppResult<bool> {
        self.authorize(principal, &Requirement::Code(code.clone()))
            .await
    }

    /// Decides a requirement for the principal.
    pub async fn authorize(
        &self,
        principal: &Principal,
        requirement: &Requirement,
    ) -> AppResult<bool> {
        let permissions = match requirement {
            Requirement::Public => EffectivePermissions::None,
            Requirement::Code(_) => self.effective_permissions(principal).await?,
        };

        let allowed = decide(principal, &permissions, requirement);
        if !allowed {
            debug!(
                subject = principal.display_subject(),
                required = requirement.code().map(PermissionCode::as_str),
                "authorization denied"
            );
        }

        Ok(allowed)
    }

    /// Decides one typed resource operation.
    pub async fn authorize_operation<O: ResourceOperation>(
        &self,
        principal: &Principal,
        operation: O,
    ) -> AppResult<bool> {
        self.authorize(principal, &operation.requirement()).await
    }

    /// Decides an operation addressed by resource and operation name.
    pub async fn authorize_resource(
        &self,
        principal: &Principal,
        resource: &str,
        operation: Option<&str>,
    ) -> AppResult<bool> {
        let requirement = self.registry.requirement_for(resource, operation);
        self.authorize(principal, &requirement).await
    }

    /// Ensures the principal satisfies a requirement.
    ///
    /// Anonymous callers get `Unauthorized`; authenticated callers that are denied get
    /// `Forbidden`.
    pub async fn require(&self, principal: &Principal, requirement: &Requirement) -> AppResult<()> {
        if !principal.is_authenticated() {
            return Err(AppError::Unauthorized(
                "authentication is required".to_owned(),
            ));
        }

        if self.authorize(principal, requirement).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(match requirement.code() {
            Some(code) => format!(
                "subject '{}' is missing permission '{code}'",
                principal.display_subject()
            ),
            None => format!("subject '{}' is inactive", principal.display_subject()),
        }))
    }

    /// Ensures the principal may perform one typed resource operation.
    pub async fn require_operation<O: ResourceOperation>(
        &self,
        principal: &Principal,
        operation: O,
    ) -> AppResult<()> {
        self.require(principal, &operation.requirement()).await
    }
}
