use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use rolegate_core::{AppError, AppResult, NonEmptyString};
use rolegate_domain::{Permission, PermissionCode, Principal, Role, RoleId};
use tokio::sync::Mutex;

use crate::{
    AuditEvent, AuditLogEntry, AuditLogRepository, AuditRepository, CreateRoleInput,
    PermissionCatalogRepository, PrincipalRepository, RoleRepository, UpdateRoleInput,
};

#[derive(Default)]
struct FakeState {
    permissions: Vec<Permission>,
    roles: Vec<Role>,
    principals: HashMap<String, Principal>,
    events: Vec<AuditEvent>,
}

impl FakeState {
    fn known_codes(&self, codes: &BTreeSet<PermissionCode>) -> BTreeSet<PermissionCode> {
        codes
            .iter()
            .filter(|code| self.permissions.iter().any(|value| value.code() == *code))
            .cloned()
            .collect()
    }

    fn role_mut(&mut self, role_id: RoleId) -> AppResult<&mut Role> {
        self.roles
            .iter_mut()
            .find(|role| role.id() == role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    fn principal_mut(&mut self, subject: &str) -> AppResult<&mut Principal> {
        self.principals
            .get_mut(subject)
            .ok_or_else(|| AppError::NotFound(format!("principal '{subject}' does not exist")))
    }
}

/// Audit writer whose storage is always down.
pub(crate) struct UnavailableAuditTrail;

#[async_trait]
impl AuditRepository for UnavailableAuditTrail {
    async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
        Err(AppError::Internal("audit trail unavailable".to_owned()))
    }
}

/// Single fake implementing every port over one shared state.
#[derive(Default)]
pub(crate) struct FakeStore {
    state: Mutex<FakeState>,
}

impl FakeStore {
    pub(crate) async fn events(&self) -> Vec<AuditEvent> {
        self.state.lock().await.events.clone()
    }

    pub(crate) async fn permission_count(&self) -> usize {
        self.state.lock().await.permissions.len()
    }
}

#[async_trait]
impl PermissionCatalogRepository for FakeStore {
    async fn upsert_permission(
        &self,
        code: &PermissionCode,
        label: &str,
        parent: Option<&PermissionCode>,
    ) -> AppResult<Permission> {
        let mut state = self.state.lock().await;
        if let Some(parent) = parent
            && !state.permissions.iter().any(|value| value.code() == parent)
        {
            return Err(AppError::NotFound(format!(
                "parent permission '{parent}' does not exist"
            )));
        }

        let permission = Permission::new(code.clone(), label, parent.cloned())?;
        match state
            .permissions
            .iter_mut()
            .find(|value| value.code() == code)
        {
            Some(existing) => {
                if existing.differs_from(permission.label().as_str(), parent) {
                    *existing = permission.clone();
                }
            }
            None => state.permissions.push(permission.clone()),
        }

        Ok(permission)
    }

    async fn find_permission(&self, code: &PermissionCode) -> AppResult<Option<Permission>> {
        Ok(self
            .state
            .lock()
            .await
            .permissions
            .iter()
            .find(|value| value.code() == code)
            .cloned())
    }

    async fn list_children(&self, parent: Option<&PermissionCode>) -> AppResult<Vec<Permission>> {
        Ok(self
            .state
            .lock()
            .await
            .permissions
            .iter()
            .filter(|value| value.parent() == parent)
            .cloned()
            .collect())
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        Ok(self.state.lock().await.permissions.clone())
    }
}

#[async_trait]
impl RoleRepository for FakeStore {
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let mut state = self.state.lock().await;
        let name = NonEmptyString::new(input.name)?;
        if state.roles.iter().any(|role| role.name() == &name) {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        let mut role = Role::new(RoleId::new(), name, input.description)?;
        role.replace_permissions(state.known_codes(&input.permissions));
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self
            .state
            .lock()
            .await
            .roles
            .iter()
            .find(|role| role.id() == role_id)
            .cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        Ok(self
            .state
            .lock()
            .await
            .roles
            .iter()
            .find(|role| role.name().as_str() == name.trim())
            .cloned())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let mut roles = self.state.lock().await.roles.clone();
        roles.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(roles)
    }

    async fn update_role(&self, role_id: RoleId, input: UpdateRoleInput) -> AppResult<Role> {
        let mut state = self.state.lock().await;
        if let Some(name) = input.name.as_deref()
            && state
                .roles
                .iter()
                .any(|role| role.id() != role_id && role.name().as_str() == name.trim())
        {
            return Err(AppError::DuplicateName(name.trim().to_owned()));
        }

        let permissions = input
            .permissions
            .as_ref()
            .map(|codes| state.known_codes(codes));
        let role = state.role_mut(role_id)?;
        let name = input.name.unwrap_or_else(|| role.name().to_string());
        let description = input
            .description
            .or_else(|| role.description().map(str::to_owned));
        role.rename(name, description)?;
        if let Some(permissions) = permissions {
            role.replace_permissions(permissions);
        }

        Ok(role.clone())
    }

    async fn replace_role_permissions(
        &self,
        role_id: RoleId,
        codes: &BTreeSet<PermissionCode>,
    ) -> AppResult<Role> {
        let mut state = self.state.lock().await;
        let permissions = state.known_codes(codes);
        let role = state.role_mut(role_id)?;
        role.replace_permissions(permissions);
        Ok(role.clone())
    }

    async fn toggle_role_active(&self, role_id: RoleId) -> AppResult<Role> {
        let mut state = self.state.lock().await;
        let has_active_dependents = state
            .principals
            .values()
            .any(|principal| principal.is_active() && principal.role_id() == Some(role_id));
        let role = state.role_mut(role_id)?;
        if role.is_active() && has_active_dependents {
            return Err(AppError::HasActiveDependents(format!(
                "role '{}' is assigned to active principals",
                role.name()
            )));
        }

        role.toggle_active();
        Ok(role.clone())
    }
}

#[async_trait]
impl PrincipalRepository for FakeStore {
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>> {
        Ok(self.state.lock().await.principals.get(subject).cloned())
    }

    async fn save_principal(&self, principal: &Principal) -> AppResult<()> {
        let Some(subject) = principal.subject() else {
            return Err(AppError::Validation(
                "anonymous principals cannot be stored".to_owned(),
            ));
        };

        self.state
            .lock()
            .await
            .principals
            .insert(subject.to_owned(), principal.clone());
        Ok(())
    }

    async fn assign_role(&self, subject: &str, role_id: Option<RoleId>) -> AppResult<Principal> {
        let mut state = self.state.lock().await;
        if let Some(role_id) = role_id {
            let role = state.role_mut(role_id)?;
            if !role.is_active() {
                return Err(AppError::Validation(format!(
                    "role '{}' is inactive",
                    role.name()
                )));
            }
        }

        let principal = state.principal_mut(subject)?;
        principal.set_role(role_id);
        Ok(principal.clone())
    }

    async fn toggle_principal_active(&self, subject: &str) -> AppResult<Principal> {
        let mut state = self.state.lock().await;
        let principal = state.principal_mut(subject)?;
        principal.toggle_active();
        Ok(principal.clone())
    }
}

#[async_trait]
impl AuditRepository for FakeStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.state.lock().await.events.push(event);
        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for FakeStore {
    async fn list_recent_entries(&self, limit: usize) -> AppResult<Vec<AuditLogEntry>> {
        let state = self.state.lock().await;
        Ok(state
            .events
            .iter()
            .enumerate()
            .rev()
            .take(limit)
            .map(|(index, event)| AuditLogEntry {
                event_id: index.to_string(),
                subject: event.subject.clone(),
                action: event.action.as_str().to_owned(),
                resource_type: event.resource_type.clone(),
                resource_id: event.resource_id.clone(),
                detail: event.detail.clone(),
                created_at: String::new(),
            })
            .collect())
    }
}

pub(crate) fn principal(subject: &str, is_superuser: bool, role_id: Option<RoleId>) -> Principal {
    match Principal::authenticated(subject, is_superuser, true, role_id) {
        Ok(principal) => principal,
        Err(error) => panic!("test principal should be valid: {error}"),
    }
}

pub(crate) fn code(value: &'static str) -> PermissionCode {
    PermissionCode::from_static(value)
}
