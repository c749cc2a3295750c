//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_log_service;
mod authorization_ports;
mod authorization_service;
mod catalog_seeder;
mod permission_catalog_service;
mod principal_admin_service;
mod resource_registry;
mod role_admin_service;

#[cfg(test)]
mod test_support;

pub use audit_log_service::{AuditLogService, MAX_AUDIT_LOG_LIMIT};
pub use authorization_ports::{
    AuditEvent, AuditLogEntry, AuditLogRepository, AuditRepository, CreateRoleInput,
    PermissionCatalogRepository, PrincipalRepository, RoleRepository, UpdateRoleInput,
};
pub use authorization_service::AuthorizationService;
pub use catalog_seeder::{CatalogSeeder, SeedReport};
pub use permission_catalog_service::PermissionCatalogService;
pub use principal_admin_service::PrincipalAdminService;
pub use resource_registry::ResourceRegistry;
pub use role_admin_service::RoleAdminService;
