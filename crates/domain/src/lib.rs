//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
pub mod catalog;
mod permission;
mod principal;
mod requirement;
pub mod resources;
mod role;

pub use audit::AuditAction;
pub use catalog::canonical_permission_tree;
pub use permission::{Permission, PermissionCode, PermissionDefinition, PermissionTreeNode};
pub use principal::{EffectivePermissions, Principal};
pub use requirement::{
    AuthorizationConfig, Requirement, RequirementMap, ResourceOperation, decide,
};
pub use role::{Role, RoleId};
