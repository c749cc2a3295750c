//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_authorization_store;
mod postgres_audit_repository;
mod postgres_permission_catalog_repository;
mod postgres_principal_repository;
mod postgres_role_repository;

pub use in_memory_authorization_store::InMemoryAuthorizationStore;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_permission_catalog_repository::PostgresPermissionCatalogRepository;
pub use postgres_principal_repository::PostgresPrincipalRepository;
pub use postgres_role_repository::PostgresRoleRepository;
