use std::sync::Arc;

use axum::http::HeaderName;
use rolegate_application::{
    AuditLogRepository, AuditLogService, AuditRepository, AuthorizationService, CatalogSeeder,
    PermissionCatalogRepository, PermissionCatalogService, PrincipalAdminService,
    PrincipalRepository, ResourceRegistry, RoleAdminService, RoleRepository,
};
use rolegate_core::AppResult;
use rolegate_infrastructure::{
    InMemoryAuthorizationStore, PostgresAuditRepository, PostgresPermissionCatalogRepository,
    PostgresPrincipalRepository, PostgresRoleRepository,
};
use sqlx::PgPool;

use crate::state::AppState;

/// Services wired over one storage backend.
#[derive(Clone)]
pub struct ApiServices {
    pub app_state: AppState,
    pub catalog_seeder: CatalogSeeder,
}

struct RepositorySet {
    catalog_repository: Arc<dyn PermissionCatalogRepository>,
    role_repository: Arc<dyn RoleRepository>,
    principal_repository: Arc<dyn PrincipalRepository>,
    audit_repository: Arc<dyn AuditRepository>,
    audit_log_repository: Arc<dyn AuditLogRepository>,
}

pub fn build_postgres_services(
    pool: &PgPool,
    principal_header: HeaderName,
) -> AppResult<ApiServices> {
    let audit_repository = Arc::new(PostgresAuditRepository::new(pool.clone()));
    build_services(
        RepositorySet {
            catalog_repository: Arc::new(PostgresPermissionCatalogRepository::new(pool.clone())),
            role_repository: Arc::new(PostgresRoleRepository::new(pool.clone())),
            principal_repository: Arc::new(PostgresPrincipalRepository::new(pool.clone())),
            audit_repository: audit_repository.clone(),
            audit_log_repository: audit_repository,
        },
        principal_header,
    )
}

pub fn build_memory_services(
    store: Arc<InMemoryAuthorizationStore>,
    principal_header: HeaderName,
) -> AppResult<ApiServices> {
    build_services(
        RepositorySet {
            catalog_repository: store.clone(),
            role_repository: store.clone(),
            principal_repository: store.clone(),
            audit_repository: store.clone(),
            audit_log_repository: store,
        },
        principal_header,
    )
}

fn build_services(
    repositories: RepositorySet,
    principal_header: HeaderName,
) -> AppResult<ApiServices> {
    let registry = Arc::new(ResourceRegistry::with_declared_resources()?);
    let authorization_service =
        AuthorizationService::new(repositories.role_repository.clone(), registry);

    let app_state = AppState {
        authorization_service: authorization_service.clone(),
        permission_catalog_service: PermissionCatalogService::new(
            repositories.catalog_repository.clone(),
        ),
        role_admin_service: RoleAdminService::new(
            authorization_service.clone(),
            repositories.role_repository.clone(),
            repositories.audit_repository.clone(),
        ),
        principal_admin_service: PrincipalAdminService::new(
            authorization_service.clone(),
            repositories.principal_repository,
            repositories.role_repository.clone(),
            repositories.audit_repository.clone(),
        ),
        audit_log_service: AuditLogService::new(
            authorization_service,
            repositories.audit_log_repository,
        ),
        principal_header,
    };

    Ok(ApiServices {
        app_state,
        catalog_seeder: CatalogSeeder::new(
            repositories.catalog_repository,
            repositories.role_repository,
            repositories.audit_repository,
        ),
    })
}
