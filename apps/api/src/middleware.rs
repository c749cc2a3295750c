use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use rolegate_core::AppError;

use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the caller from the subject header set by the upstream authentication gate.
///
/// Missing or unknown subjects resolve to the anonymous principal, which is rejected here
/// before any authorization decision runs.
pub async fn require_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let subject = request
        .headers()
        .get(&state.principal_header)
        .map(|value| {
            value.to_str().map_err(|error| {
                AppError::Validation(format!(
                    "header '{}' is not valid text: {error}",
                    state.principal_header
                ))
            })
        })
        .transpose()?;

    let principal = state
        .principal_admin_service
        .resolve_principal(subject)
        .await?;
    if !principal.is_authenticated() {
        return Err(AppError::Unauthorized("authentication required".to_owned()).into());
    }

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
