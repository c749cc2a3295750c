use axum::Json;
use axum::extract::State;

use crate::dto::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Reports liveness together with the size of the stored permission catalog.
///
/// An empty catalog means the store is reachable but `seed` has not run yet.
pub async fn health_handler(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let catalog = state.permission_catalog_service.list().await?;
    let status = if catalog.is_empty() { "unseeded" } else { "ok" };

    Ok(Json(HealthResponse {
        status,
        catalog_codes: u32::try_from(catalog.len()).unwrap_or(u32::MAX),
    }))
}
