use axum::Json;
use axum::extract::{Extension, State};
use rolegate_core::AppError;
use rolegate_domain::resources::PermissionTreeOperation;
use rolegate_domain::{EffectivePermissions, PermissionCode, Principal, Requirement};

use crate::dto::{
    AuthorizationCheckRequest, AuthorizationCheckResponse, EffectivePermissionsResponse,
    PermissionTreeNodeResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn permission_tree_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<PermissionTreeNodeResponse>>> {
    state
        .authorization_service
        .require_operation(&principal, PermissionTreeOperation::Read)
        .await?;

    let tree = state
        .permission_catalog_service
        .permission_tree()
        .await?
        .into_iter()
        .map(PermissionTreeNodeResponse::from)
        .collect();

    Ok(Json(tree))
}

pub async fn my_permissions_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<EffectivePermissionsResponse>> {
    let permissions = match state
        .authorization_service
        .effective_permissions(&principal)
        .await?
    {
        EffectivePermissions::All => state
            .permission_catalog_service
            .list()
            .await?
            .iter()
            .map(|permission| permission.code().as_str().to_owned())
            .collect(),
        effective => effective
            .codes()
            .into_iter()
            .map(|code| code.as_str().to_owned())
            .collect(),
    };

    Ok(Json(EffectivePermissionsResponse {
        subject: principal.display_subject().to_owned(),
        is_superuser: principal.is_superuser(),
        role_id: principal.role_id().map(|role_id| role_id.to_string()),
        permissions,
    }))
}

pub async fn check_authorization_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<AuthorizationCheckRequest>,
) -> ApiResult<Json<AuthorizationCheckResponse>> {
    let requirement = match (payload.permission, payload.resource) {
        (Some(code), None) => Requirement::Code(PermissionCode::new(code)?),
        (None, Some(resource)) => state
            .authorization_service
            .registry()
            .requirement_for(resource.trim(), payload.operation.as_deref().map(str::trim)),
        _ => {
            return Err(AppError::Validation(
                "provide either 'permission' or 'resource'".to_owned(),
            )
            .into());
        }
    };

    let allowed = state
        .authorization_service
        .authorize(&principal, &requirement)
        .await?;

    Ok(Json(AuthorizationCheckResponse {
        allowed,
        required_permission: requirement.code().map(|code| code.as_str().to_owned()),
    }))
}
