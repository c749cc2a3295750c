use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use rolegate_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url, &app_state.principal_header)?;

    let protected_routes = Router::new()
        .route(
            "/api/permissions/tree",
            get(handlers::authorization::permission_tree_handler),
        )
        .route(
            "/api/me/permissions",
            get(handlers::authorization::my_permissions_handler),
        )
        .route(
            "/api/authorization/check",
            post(handlers::authorization::check_authorization_handler),
        )
        .route(
            "/api/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/api/roles/{role_id}",
            get(handlers::roles::get_role_handler)
                .put(handlers::roles::update_role_handler)
                .patch(handlers::roles::partial_update_role_handler),
        )
        .route(
            "/api/roles/{role_id}/permissions",
            get(handlers::roles::role_permissions_handler)
                .post(handlers::roles::set_role_permissions_handler),
        )
        .route(
            "/api/roles/{role_id}/toggle-status",
            post(handlers::roles::toggle_role_status_handler),
        )
        .route(
            "/api/principals/roles",
            get(handlers::principals::assignable_roles_handler),
        )
        .route(
            "/api/principals/{subject}/role",
            put(handlers::principals::assign_role_handler),
        )
        .route(
            "/api/principals/{subject}/toggle-status",
            post(handlers::principals::toggle_principal_status_handler),
        )
        .route(
            "/api/audit-log",
            get(handlers::audit::list_audit_log_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_principal,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
