use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use rolegate_application::{CreateRoleInput, UpdateRoleInput};
use rolegate_domain::Principal;

use super::{parse_codes, parse_role_id};
use crate::dto::{
    CreateRoleRequest, RolePermissionsResponse, RoleResponse, SetRolePermissionsRequest,
    SetRolePermissionsResponse, UpdateRoleRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .role_admin_service
        .list_roles(&principal)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .role_admin_service
        .create_role(
            &principal,
            CreateRoleInput {
                name: payload.name,
                description: payload.description,
                permissions: parse_codes(payload.permissions)?,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_admin_service
        .get_role(&principal, parse_role_id(&role_id)?)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(role_id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_admin_service
        .update_role(
            &principal,
            parse_role_id(&role_id)?,
            update_input(payload)?,
        )
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn partial_update_role_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(role_id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_admin_service
        .partial_update_role(
            &principal,
            parse_role_id(&role_id)?,
            update_input(payload)?,
        )
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn role_permissions_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<RolePermissionsResponse>> {
    let role_id = parse_role_id(&role_id)?;
    let permissions = state
        .role_admin_service
        .role_permissions(&principal, role_id)
        .await?
        .into_iter()
        .map(String::from)
        .collect();

    Ok(Json(RolePermissionsResponse {
        role_id: role_id.to_string(),
        permissions,
    }))
}

pub async fn set_role_permissions_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(role_id): Path<String>,
    Json(payload): Json<SetRolePermissionsRequest>,
) -> ApiResult<Json<SetRolePermissionsResponse>> {
    let role_id = parse_role_id(&role_id)?;
    let applied = state
        .role_admin_service
        .set_role_permissions(&principal, role_id, parse_codes(payload.permissions)?)
        .await?;

    Ok(Json(SetRolePermissionsResponse {
        role_id: role_id.to_string(),
        applied: u32::try_from(applied).unwrap_or(u32::MAX),
    }))
}

pub async fn toggle_role_status_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_admin_service
        .toggle_role_status(&principal, parse_role_id(&role_id)?)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

fn update_input(payload: UpdateRoleRequest) -> ApiResult<UpdateRoleInput> {
    Ok(UpdateRoleInput {
        name: payload.name,
        description: payload.description,
        permissions: payload.permissions.map(parse_codes).transpose()?,
    })
}
