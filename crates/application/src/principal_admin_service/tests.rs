use std::collections::BTreeSet;
use std::sync::Arc;

use rolegate_core::AppError;
use rolegate_domain::{AuditAction, Principal, RoleId};

use crate::test_support::{FakeStore, UnavailableAuditTrail, principal};
use crate::{
    AuthorizationService, CreateRoleInput, PrincipalAdminService, PrincipalRepository,
    ResourceRegistry, RoleRepository,
};

async fn fixture() -> (Arc<FakeStore>, PrincipalAdminService, RoleId) {
    let store = Arc::new(FakeStore::default());
    let created = store
        .create_role(CreateRoleInput {
            name: "Editor".to_owned(),
            description: None,
            permissions: BTreeSet::new(),
        })
        .await;
    let Ok(role) = created else {
        panic!("role should be created");
    };
    assert!(
        store
            .save_principal(&principal("holder", false, None))
            .await
            .is_ok()
    );

    let registry = ResourceRegistry::with_declared_resources().unwrap_or_default();
    let authorization_service = AuthorizationService::new(store.clone(), Arc::new(registry));
    let service = PrincipalAdminService::new(
        authorization_service,
        store.clone(),
        store.clone(),
        store.clone(),
    );
    (store, service, role.id())
}

fn root() -> Principal {
    principal("root", true, None)
}

#[tokio::test]
async fn unknown_or_missing_subject_resolves_to_anonymous() {
    let (_, service, _) = fixture().await;

    let missing = service.resolve_principal(None).await;
    assert_eq!(missing.ok(), Some(Principal::anonymous()));

    let unknown = service.resolve_principal(Some("stranger")).await;
    assert_eq!(unknown.ok(), Some(Principal::anonymous()));

    let known = service.resolve_principal(Some(" holder ")).await;
    assert_eq!(
        known.ok().and_then(|value| value.subject().map(str::to_owned)),
        Some("holder".to_owned())
    );
}

#[tokio::test]
async fn assign_role_records_an_audit_event() {
    let (store, service, role_id) = fixture().await;

    let assigned = service.assign_role(&root(), "holder", Some(role_id)).await;
    assert_eq!(assigned.ok().and_then(|value| value.role_id()), Some(role_id));

    let events = store.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::PrincipalRoleAssigned);
    assert_eq!(events[0].resource_id, "holder");
}

#[tokio::test]
async fn inactive_role_cannot_be_assigned_or_listed() {
    let (store, service, role_id) = fixture().await;
    assert!(store.toggle_role_active(role_id).await.is_ok());

    let assigned = service.assign_role(&root(), "holder", Some(role_id)).await;
    assert!(matches!(assigned, Err(AppError::Validation(_))));

    let assignable = service.assignable_roles(&root()).await.unwrap_or_default();
    assert!(assignable.is_empty());
}

#[tokio::test]
async fn toggle_status_flips_the_principal() {
    let (_, service, _) = fixture().await;

    let toggled = service.toggle_principal_status(&root(), "holder").await;
    assert_eq!(toggled.ok().map(|value| value.is_active()), Some(false));

    let missing = service.toggle_principal_status(&root(), "stranger").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn user_administration_requires_user_permissions() {
    let (_, service, _) = fixture().await;
    let clerk = principal("clerk", false, None);

    let result = service.assign_role(&clerk, "holder", None).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn assignment_stays_committed_when_the_audit_append_fails() {
    let (store, _, role_id) = fixture().await;
    let registry = ResourceRegistry::with_declared_resources().unwrap_or_default();
    let service = PrincipalAdminService::new(
        AuthorizationService::new(store.clone(), Arc::new(registry)),
        store.clone(),
        store.clone(),
        Arc::new(UnavailableAuditTrail),
    );

    let assigned = service.assign_role(&root(), "holder", Some(role_id)).await;
    assert!(matches!(assigned, Err(AppError::Internal(_))));

    let stored = store.find_principal("holder").await.ok().flatten();
    assert_eq!(stored.and_then(|value| value.role_id()), Some(role_id));
    assert!(store.events().await.is_empty());
}
