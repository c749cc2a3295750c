use std::sync::Arc;

use rolegate_core::AppResult;
use rolegate_domain::Principal;
use rolegate_domain::resources::AUDIT_LOG_RESOURCE;

use crate::{AuditLogEntry, AuditLogRepository, AuthorizationService};

/// Upper bound on entries returned by one audit log query.
pub const MAX_AUDIT_LOG_LIMIT: usize = 1000;

/// Application service for reading the global audit log.
#[derive(Clone)]
pub struct AuditLogService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn AuditLogRepository>,
}

impl AuditLogService {
    /// Creates a new audit log service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn AuditLogRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
        }
    }

    /// Lists the most recent entries, newest first. The limit is capped.
    pub async fn list_recent(
        &self,
        actor: &Principal,
        limit: Option<usize>,
    ) -> AppResult<Vec<AuditLogEntry>> {
        let requirement = self
            .authorization_service
            .registry()
            .requirement_for(AUDIT_LOG_RESOURCE, None);
        self.authorization_service.require(actor, &requirement).await?;

        let limit = limit
            .unwrap_or(MAX_AUDIT_LOG_LIMIT)
            .clamp(1, MAX_AUDIT_LOG_LIMIT);
        self.repository.list_recent_entries(limit).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rolegate_core::AppError;
    use rolegate_domain::AuditAction;

    use super::AuditLogService;
    use crate::test_support::{FakeStore, principal};
    use crate::{AuditEvent, AuditRepository, AuthorizationService, ResourceRegistry};

    fn service(store: Arc<FakeStore>) -> AuditLogService {
        let registry = ResourceRegistry::with_declared_resources().unwrap_or_default();
        let authorization_service = AuthorizationService::new(store.clone(), Arc::new(registry));
        AuditLogService::new(authorization_service, store)
    }

    async fn append(store: &FakeStore, resource_id: &str) {
        let appended = store
            .append_event(AuditEvent {
                subject: "root".to_owned(),
                action: AuditAction::RoleCreated,
                resource_type: "role".to_owned(),
                resource_id: resource_id.to_owned(),
                detail: None,
            })
            .await;
        assert!(appended.is_ok());
    }

    #[tokio::test]
    async fn lists_newest_first_within_limit() {
        let store = Arc::new(FakeStore::default());
        for resource_id in ["first", "second", "third"] {
            append(&store, resource_id).await;
        }

        let entries = service(store)
            .list_recent(&principal("root", true, None), Some(2))
            .await
            .unwrap_or_default();
        let ids: Vec<&str> = entries
            .iter()
            .map(|entry| entry.resource_id.as_str())
            .collect();
        assert_eq!(ids, vec!["third", "second"]);
    }

    #[tokio::test]
    async fn requires_global_history_permission() {
        let store = Arc::new(FakeStore::default());
        append(&store, "first").await;

        let result = service(store)
            .list_recent(&principal("clerk", false, None), None)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
