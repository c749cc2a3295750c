use async_trait::async_trait;

use rolegate_core::AppResult;
use rolegate_domain::{Permission, PermissionCode};

/// Repository port for the permission tree.
#[async_trait]
pub trait PermissionCatalogRepository: Send + Sync {
    /// Creates the permission or updates its label and parent when they differ.
    ///
    /// Implementations must reject a parent that does not exist (`NotFound`) and a
    /// re-parenting that would close a cycle (`Validation`).
    async fn upsert_permission(
        &self,
        code: &PermissionCode,
        label: &str,
        parent: Option<&PermissionCode>,
    ) -> AppResult<Permission>;

    /// Finds one permission by code.
    async fn find_permission(&self, code: &PermissionCode) -> AppResult<Option<Permission>>;

    /// Lists direct children of a parent, roots when `parent` is `None`, in insertion order.
    async fn list_children(&self, parent: Option<&PermissionCode>) -> AppResult<Vec<Permission>>;

    /// Lists every permission in insertion order.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;
}
