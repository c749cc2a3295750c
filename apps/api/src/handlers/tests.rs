use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderName, StatusCode};
use axum::response::IntoResponse;
use rolegate_domain::{Principal, RoleId, canonical_permission_tree};
use rolegate_infrastructure::InMemoryAuthorizationStore;

use super::audit::{AuditLogQuery, list_audit_log_handler};
use super::authorization::{
    check_authorization_handler, my_permissions_handler, permission_tree_handler,
};
use super::principals::{assign_role_handler, assignable_roles_handler};
use super::roles::{
    create_role_handler, get_role_handler, list_roles_handler, partial_update_role_handler,
    set_role_permissions_handler, toggle_role_status_handler, update_role_handler,
};
use crate::api_services::{ApiServices, build_memory_services};
use crate::dto::{
    AssignRoleRequest, AuthorizationCheckRequest, CreateRoleRequest, RoleResponse,
    SetRolePermissionsRequest, UpdateRoleRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

async fn seeded_services() -> ApiServices {
    let Ok(services) = build_memory_services(
        Arc::new(InMemoryAuthorizationStore::new()),
        HeaderName::from_static("x-authenticated-subject"),
    ) else {
        panic!("services should build");
    };

    let seeded = services
        .catalog_seeder
        .seed_all(&canonical_permission_tree(), "Super Administrator")
        .await;
    assert!(seeded.is_ok());
    services
}

async fn record(
    state: &AppState,
    subject: &str,
    is_superuser: bool,
    role_id: Option<RoleId>,
) -> Principal {
    let Ok(principal) = Principal::authenticated(subject, is_superuser, true, role_id) else {
        panic!("principal should be valid");
    };
    let recorded = state
        .principal_admin_service
        .record_principal(&principal)
        .await;
    assert!(recorded.is_ok());
    principal
}

async fn create_role(
    state: &AppState,
    admin: &Principal,
    name: &str,
    codes: &[&str],
) -> RoleResponse {
    let created = create_role_handler(
        State(state.clone()),
        Extension(admin.clone()),
        Json(CreateRoleRequest {
            name: name.to_owned(),
            description: None,
            permissions: codes.iter().map(|code| (*code).to_owned()).collect(),
        }),
    )
    .await;

    let Ok((status, Json(role))) = created else {
        panic!("role should be created");
    };
    assert_eq!(status, StatusCode::CREATED);
    role
}

fn role_id(role: &RoleResponse) -> RoleId {
    let Ok(role_id) = role.id.parse::<RoleId>() else {
        panic!("role id should parse");
    };
    role_id
}

fn status_of<T>(result: ApiResult<T>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(error) => error.into_response().status(),
    }
}

#[tokio::test]
async fn superuser_sees_the_whole_catalog() {
    let services = seeded_services().await;
    let state = services.app_state;
    let admin = record(&state, "root", true, None).await;

    let tree = permission_tree_handler(State(state.clone()), Extension(admin.clone())).await;
    let Ok(Json(tree)) = tree else {
        panic!("tree should load");
    };
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].code, "permissions");
    assert_eq!(tree[0].children.len(), 7);

    let Ok(Json(me)) = my_permissions_handler(State(state), Extension(admin)).await else {
        panic!("effective permissions should load");
    };
    assert!(me.is_superuser);
    assert_eq!(me.permissions.len(), 34);
}

#[tokio::test]
async fn role_grants_drive_role_management_access() {
    let services = seeded_services().await;
    let state = services.app_state;
    let admin = record(&state, "root", true, None).await;
    let viewer_role = create_role(&state, &admin, "Viewer", &["roles.list", "never.seeded"]).await;
    assert_eq!(viewer_role.permissions, vec!["roles.list"]);

    let viewer = record(&state, "viewer", false, Some(role_id(&viewer_role))).await;

    let listed = list_roles_handler(State(state.clone()), Extension(viewer.clone())).await;
    let Ok(Json(roles)) = listed else {
        panic!("viewer should list roles");
    };
    assert!(roles.iter().any(|role| role.name == "Viewer"));

    let denied = create_role_handler(
        State(state.clone()),
        Extension(viewer.clone()),
        Json(CreateRoleRequest {
            name: "Sneaky".to_owned(),
            description: None,
            permissions: Vec::new(),
        }),
    )
    .await;
    assert_eq!(status_of(denied), StatusCode::FORBIDDEN);

    let Ok(Json(me)) = my_permissions_handler(State(state), Extension(viewer)).await else {
        panic!("effective permissions should load");
    };
    assert!(!me.is_superuser);
    assert_eq!(me.permissions, vec!["roles.list"]);
}

#[tokio::test]
async fn authorization_check_covers_codes_resources_and_bad_input() {
    let services = seeded_services().await;
    let state = services.app_state;
    let admin = record(&state, "root", true, None).await;
    let role = create_role(&state, &admin, "Lister", &["roles.list"]).await;
    let lister = record(&state, "lister", false, Some(role_id(&role))).await;

    let check = |resource: Option<&str>, operation: Option<&str>, permission: Option<&str>| {
        check_authorization_handler(
            State(state.clone()),
            Extension(lister.clone()),
            Json(AuthorizationCheckRequest {
                resource: resource.map(str::to_owned),
                operation: operation.map(str::to_owned),
                permission: permission.map(str::to_owned),
            }),
        )
    };

    let Ok(Json(by_code)) = check(None, None, Some("roles.list")).await else {
        panic!("check should succeed");
    };
    assert!(by_code.allowed);

    let Ok(Json(by_operation)) = check(Some("roles"), Some("create"), None).await else {
        panic!("check should succeed");
    };
    assert!(!by_operation.allowed);
    assert_eq!(
        by_operation.required_permission.as_deref(),
        Some("roles.create")
    );

    let Ok(Json(undeclared)) = check(Some("chat"), Some("send"), None).await else {
        panic!("check should succeed");
    };
    assert!(undeclared.allowed);
    assert!(undeclared.required_permission.is_none());

    assert_eq!(status_of(check(None, None, None).await), StatusCode::BAD_REQUEST);
    assert_eq!(
        status_of(check(Some("roles"), None, Some("roles.list")).await),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn deactivating_an_assigned_role_is_a_conflict() {
    let services = seeded_services().await;
    let state = services.app_state;
    let admin = record(&state, "root", true, None).await;
    let role = create_role(&state, &admin, "Editor", &["roles.update"]).await;
    record(&state, "editor", false, Some(role_id(&role))).await;

    let blocked = toggle_role_status_handler(
        State(state.clone()),
        Extension(admin.clone()),
        Path(role.id.clone()),
    )
    .await;
    assert_eq!(status_of(blocked), StatusCode::CONFLICT);

    let cleared = assign_role_handler(
        State(state.clone()),
        Extension(admin.clone()),
        Path("editor".to_owned()),
        Json(AssignRoleRequest { role_id: None }),
    )
    .await;
    assert!(cleared.is_ok());

    let Ok(Json(toggled)) =
        toggle_role_status_handler(State(state.clone()), Extension(admin.clone()), Path(role.id))
            .await
    else {
        panic!("role should toggle once unassigned");
    };
    assert!(!toggled.is_active);

    let Ok(Json(assignable)) = assignable_roles_handler(State(state), Extension(admin)).await
    else {
        panic!("assignable roles should load");
    };
    assert!(assignable.iter().all(|role| role.name != "Editor"));
}

#[tokio::test]
async fn updates_and_permission_replacement() {
    let services = seeded_services().await;
    let state = services.app_state;
    let admin = record(&state, "root", true, None).await;
    let role = create_role(&state, &admin, "Auditor", &[]).await;

    let full_without_name = update_role_handler(
        State(state.clone()),
        Extension(admin.clone()),
        Path(role.id.clone()),
        Json(UpdateRoleRequest {
            name: None,
            description: Some("Reads history".to_owned()),
            permissions: None,
        }),
    )
    .await;
    assert_eq!(status_of(full_without_name), StatusCode::BAD_REQUEST);

    let Ok(Json(patched)) = partial_update_role_handler(
        State(state.clone()),
        Extension(admin.clone()),
        Path(role.id.clone()),
        Json(UpdateRoleRequest {
            name: None,
            description: Some("Reads history".to_owned()),
            permissions: None,
        }),
    )
    .await
    else {
        panic!("partial update should succeed");
    };
    assert_eq!(patched.name, "Auditor");
    assert_eq!(patched.description.as_deref(), Some("Reads history"));

    let Ok(Json(applied)) = set_role_permissions_handler(
        State(state.clone()),
        Extension(admin.clone()),
        Path(role.id.clone()),
        Json(SetRolePermissionsRequest {
            permissions: vec![
                "audit.global_history.read".to_owned(),
                "reports.export".to_owned(),
            ],
        }),
    )
    .await
    else {
        panic!("permissions should be replaced");
    };
    assert_eq!(applied.applied, 1);

    let Ok(Json(reloaded)) =
        get_role_handler(State(state), Extension(admin), Path(role.id)).await
    else {
        panic!("role should load");
    };
    assert_eq!(reloaded.permissions, vec!["audit.global_history.read"]);
}

#[tokio::test]
async fn malformed_role_ids_are_bad_requests() {
    let services = seeded_services().await;
    let state = services.app_state;
    let admin = record(&state, "root", true, None).await;

    let malformed = get_role_handler(
        State(state.clone()),
        Extension(admin.clone()),
        Path("not-a-uuid".to_owned()),
    )
    .await;
    assert_eq!(status_of(malformed), StatusCode::BAD_REQUEST);

    let missing = get_role_handler(
        State(state),
        Extension(admin),
        Path(RoleId::new().to_string()),
    )
    .await;
    assert_eq!(status_of(missing), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn audit_log_requires_the_history_permission() {
    let services = seeded_services().await;
    let state = services.app_state;
    let admin = record(&state, "root", true, None).await;
    create_role(&state, &admin, "Editor", &[]).await;
    let outsider = record(&state, "outsider", false, None).await;

    let denied = list_audit_log_handler(
        State(state.clone()),
        Extension(outsider),
        Query(AuditLogQuery { limit: None }),
    )
    .await;
    assert_eq!(status_of(denied), StatusCode::FORBIDDEN);

    let Ok(Json(entries)) = list_audit_log_handler(
        State(state),
        Extension(admin),
        Query(AuditLogQuery { limit: Some(1) }),
    )
    .await
    else {
        panic!("audit log should load");
    };
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "security.role.created");
}
