use axum::Json;
use axum::extract::{Extension, Path, State};
use rolegate_domain::Principal;

use super::parse_role_id;
use crate::dto::{AssignRoleRequest, PrincipalResponse, RoleResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn assignable_roles_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .principal_admin_service
        .assignable_roles(&principal)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(subject): Path<String>,
    Json(payload): Json<AssignRoleRequest>,
) -> ApiResult<Json<PrincipalResponse>> {
    let role_id = payload
        .role_id
        .as_deref()
        .map(parse_role_id)
        .transpose()?;
    let updated = state
        .principal_admin_service
        .assign_role(&principal, subject.as_str(), role_id)
        .await?;

    Ok(Json(PrincipalResponse::from(updated)))
}

pub async fn toggle_principal_status_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(subject): Path<String>,
) -> ApiResult<Json<PrincipalResponse>> {
    let updated = state
        .principal_admin_service
        .toggle_principal_status(&principal, subject.as_str())
        .await?;

    Ok(Json(PrincipalResponse::from(updated)))
}
