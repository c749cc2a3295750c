mod audit;
mod catalog;
mod principals;
mod roles;

pub use audit::{AuditEvent, AuditLogEntry, AuditLogRepository, AuditRepository};
pub use catalog::PermissionCatalogRepository;
pub use principals::PrincipalRepository;
pub use roles::{CreateRoleInput, RoleRepository, UpdateRoleInput};
