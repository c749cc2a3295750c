use axum::http::HeaderName;
use rolegate_application::{
    AuditLogService, AuthorizationService, PermissionCatalogService, PrincipalAdminService,
    RoleAdminService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub permission_catalog_service: PermissionCatalogService,
    pub role_admin_service: RoleAdminService,
    pub principal_admin_service: PrincipalAdminService,
    pub audit_log_service: AuditLogService,
    pub principal_header: HeaderName,
}
