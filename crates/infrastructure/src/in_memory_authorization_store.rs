use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rolegate_application::{
    AuditEvent, AuditLogEntry, AuditLogRepository, AuditRepository, CreateRoleInput,
    PermissionCatalogRepository, PrincipalRepository, RoleRepository, UpdateRoleInput,
};
use rolegate_core::{AppError, AppResult, NonEmptyString};
use rolegate_domain::{Permission, PermissionCode, Principal, Role, RoleId};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredAuditEvent {
    id: Uuid,
    event: AuditEvent,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreState {
    permissions: Vec<Permission>,
    roles: HashMap<RoleId, Role>,
    principals: HashMap<String, Principal>,
    audit_events: Vec<StoredAuditEvent>,
}

impl StoreState {
    fn permission(&self, code: &PermissionCode) -> Option<&Permission> {
        self.permissions
            .iter()
            .find(|permission| permission.code() == code)
    }

    fn ensure_acyclic(&self, code: &PermissionCode, parent: &PermissionCode) -> AppResult<()> {
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == code {
                return Err(AppError::Validation(format!(
                    "moving permission '{code}' under '{parent}' would create a cycle"
                )));
            }

            cursor = self.permission(current).and_then(Permission::parent);
        }

        Ok(())
    }

    fn known_codes(&self, codes: &BTreeSet<PermissionCode>) -> BTreeSet<PermissionCode> {
        codes
            .iter()
            .filter(|code| self.permission(code).is_some())
            .cloned()
            .collect()
    }

    fn ensure_unique_name(&self, name: &NonEmptyString, except: Option<RoleId>) -> AppResult<()> {
        let taken = self
            .roles
            .values()
            .any(|role| Some(role.id()) != except && role.name() == name);
        if taken {
            return Err(AppError::DuplicateName(format!(
                "role '{name}' already exists"
            )));
        }

        Ok(())
    }

    fn role_mut(&mut self, role_id: RoleId) -> AppResult<&mut Role> {
        self.roles
            .get_mut(&role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    fn principal_mut(&mut self, subject: &str) -> AppResult<&mut Principal> {
        self.principals
            .get_mut(subject)
            .ok_or_else(|| AppError::NotFound(format!("principal '{subject}' does not exist")))
    }
}

/// In-memory implementation of every authorization port over one shared state.
///
/// A single lock guards all collections, so the role deactivation guard and the
/// inactive-role assignment check observe a consistent snapshot.
#[derive(Debug, Default)]
pub struct InMemoryAuthorizationStore {
    state: RwLock<StoreState>,
}

impl InMemoryAuthorizationStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionCatalogRepository for InMemoryAuthorizationStore {
    async fn upsert_permission(
        &self,
        code: &PermissionCode,
        label: &str,
        parent: Option<&PermissionCode>,
    ) -> AppResult<Permission> {
        let mut state = self.state.write().await;
        if let Some(parent) = parent {
            if state.permission(parent).is_none() {
                return Err(AppError::NotFound(format!(
                    "parent permission '{parent}' does not exist"
                )));
            }

            state.ensure_acyclic(code, parent)?;
        }

        let permission = Permission::new(code.clone(), label, parent.cloned())?;
        match state
            .permissions
            .iter_mut()
            .find(|stored| stored.code() == code)
        {
            Some(stored) => {
                if stored.differs_from(permission.label().as_str(), permission.parent()) {
                    *stored = permission.clone();
                }
            }
            None => state.permissions.push(permission.clone()),
        }

        Ok(permission)
    }

    async fn find_permission(&self, code: &PermissionCode) -> AppResult<Option<Permission>> {
        Ok(self.state.read().await.permission(code).cloned())
    }

    async fn list_children(&self, parent: Option<&PermissionCode>) -> AppResult<Vec<Permission>> {
        Ok(self
            .state
            .read()
            .await
            .permissions
            .iter()
            .filter(|permission| permission.parent() == parent)
            .cloned()
            .collect())
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        Ok(self.state.read().await.permissions.clone())
    }
}

#[async_trait]
impl RoleRepository for InMemoryAuthorizationStore {
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let mut state = self.state.write().await;
        let name = NonEmptyString::new(input.name)?;
        state.ensure_unique_name(&name, None)?;

        let mut role = Role::new(RoleId::new(), name, input.description)?;
        role.replace_permissions(state.known_codes(&input.permissions));
        state.roles.insert(role.id(), role.clone());

        Ok(role)
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.state.read().await.roles.get(&role_id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let name = name.trim();
        Ok(self
            .state
            .read()
            .await
            .roles
            .values()
            .find(|role| role.name().as_str() == name)
            .cloned())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let mut roles: Vec<Role> = self.state.read().await.roles.values().cloned().collect();
        roles.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(roles)
    }

    async fn update_role(&self, role_id: RoleId, input: UpdateRoleInput) -> AppResult<Role> {
        let mut state = self.state.write().await;
        if let Some(name) = input.name.as_deref() {
            state.ensure_unique_name(&NonEmptyString::new(name)?, Some(role_id))?;
        }

        let permissions = input
            .permissions
            .as_ref()
            .map(|codes| state.known_codes(codes));
        let role = state.role_mut(role_id)?;
        let mut updated = role.clone();
        let name = input.name.unwrap_or_else(|| updated.name().to_string());
        let description = match input.description {
            Some(description) => Some(description),
            None => updated.description().map(str::to_owned),
        };
        updated.rename(name, description)?;
        if let Some(permissions) = permissions {
            updated.replace_permissions(permissions);
        }

        *role = updated.clone();
        Ok(updated)
    }

    async fn replace_role_permissions(
        &self,
        role_id: RoleId,
        codes: &BTreeSet<PermissionCode>,
    ) -> AppResult<Role> {
        let mut state = self.state.write().await;
        let permissions = state.known_codes(codes);
        let role = state.role_mut(role_id)?;
        role.replace_permissions(permissions);
        Ok(role.clone())
    }

    async fn toggle_role_active(&self, role_id: RoleId) -> AppResult<Role> {
        let mut state = self.state.write().await;
        let active_dependents = state
            .principals
            .values()
            .filter(|principal| principal.is_active() && principal.role_id() == Some(role_id))
            .count();

        let role = state.role_mut(role_id)?;
        if role.is_active() && active_dependents > 0 {
            return Err(AppError::HasActiveDependents(format!(
                "role '{}' is assigned to {active_dependents} active principal(s)",
                role.name()
            )));
        }

        role.toggle_active();
        Ok(role.clone())
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryAuthorizationStore {
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>> {
        Ok(self.state.read().await.principals.get(subject).cloned())
    }

    async fn save_principal(&self, principal: &Principal) -> AppResult<()> {
        let Some(subject) = principal.subject() else {
            return Err(AppError::Validation(
                "anonymous principals cannot be stored".to_owned(),
            ));
        };

        let mut state = self.state.write().await;
        if let Some(role_id) = principal.role_id()
            && !state.roles.contains_key(&role_id)
        {
            return Err(AppError::NotFound(format!("role '{role_id}' does not exist")));
        }

        state
            .principals
            .insert(subject.to_owned(), principal.clone());
        Ok(())
    }

    async fn assign_role(&self, subject: &str, role_id: Option<RoleId>) -> AppResult<Principal> {
        let mut state = self.state.write().await;
        if let Some(role_id) = role_id {
            let role = state.role_mut(role_id)?;
            if !role.is_active() {
                return Err(AppError::Validation(format!(
                    "role '{}' is inactive and cannot be assigned",
                    role.name()
                )));
            }
        }

        let principal = state.principal_mut(subject)?;
        principal.set_role(role_id);
        Ok(principal.clone())
    }

    async fn toggle_principal_active(&self, subject: &str) -> AppResult<Principal> {
        let mut state = self.state.write().await;
        let principal = state.principal_mut(subject)?;
        principal.toggle_active();
        Ok(principal.clone())
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuthorizationStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.state
            .write()
            .await
            .audit_events
            .push(StoredAuditEvent {
                id: Uuid::new_v4(),
                event,
                created_at: Utc::now(),
            });
        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuthorizationStore {
    async fn list_recent_entries(&self, limit: usize) -> AppResult<Vec<AuditLogEntry>> {
        Ok(self
            .state
            .read()
            .await
            .audit_events
            .iter()
            .rev()
            .take(limit)
            .map(|stored| AuditLogEntry {
                event_id: stored.id.to_string(),
                subject: stored.event.subject.clone(),
                action: stored.event.action.as_str().to_owned(),
                resource_type: stored.event.resource_type.clone(),
                resource_id: stored.event.resource_id.clone(),
                detail: stored.event.detail.clone(),
                created_at: stored.created_at.to_rfc3339(),
            })
            .collect())
    }
}
