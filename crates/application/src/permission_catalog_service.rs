use std::collections::HashMap;
use std::sync::Arc;

use rolegate_core::AppResult;
use rolegate_domain::{Permission, PermissionCode, PermissionTreeNode};

use crate::PermissionCatalogRepository;

/// Application service over the permission tree.
#[derive(Clone)]
pub struct PermissionCatalogService {
    repository: Arc<dyn PermissionCatalogRepository>,
}

impl PermissionCatalogService {
    /// Creates a new catalog service.
    #[must_use]
    pub fn new(repository: Arc<dyn PermissionCatalogRepository>) -> Self {
        Self { repository }
    }

    /// Creates or updates one permission by code.
    pub async fn upsert(
        &self,
        code: &PermissionCode,
        label: &str,
        parent: Option<&PermissionCode>,
    ) -> AppResult<Permission> {
        self.repository.upsert_permission(code, label, parent).await
    }

    /// Lists direct children of a node, roots when `parent` is `None`.
    pub async fn children(&self, parent: Option<&PermissionCode>) -> AppResult<Vec<Permission>> {
        self.repository.list_children(parent).await
    }

    /// Returns whether a code exists in the catalog.
    pub async fn exists(&self, code: &PermissionCode) -> AppResult<bool> {
        Ok(self.repository.find_permission(code).await?.is_some())
    }

    /// Lists every permission.
    pub async fn list(&self) -> AppResult<Vec<Permission>> {
        self.repository.list_permissions().await
    }

    /// Materializes the full forest, roots first, children in insertion order.
    pub async fn permission_tree(&self) -> AppResult<Vec<PermissionTreeNode>> {
        let permissions = self.repository.list_permissions().await?;
        let mut children_by_parent: HashMap<Option<&PermissionCode>, Vec<&Permission>> =
            HashMap::new();
        for permission in &permissions {
            children_by_parent
                .entry(permission.parent())
                .or_default()
                .push(permission);
        }

        Ok(build_nodes(&children_by_parent, None))
    }
}

fn build_nodes<'a>(
    children_by_parent: &HashMap<Option<&'a PermissionCode>, Vec<&'a Permission>>,
    parent: Option<&'a PermissionCode>,
) -> Vec<PermissionTreeNode> {
    children_by_parent
        .get(&parent)
        .map(|children| {
            children
                .iter()
                .map(|permission| PermissionTreeNode {
                    label: permission.label().to_string(),
                    code: permission.code().to_string(),
                    children: build_nodes(children_by_parent, Some(permission.code())),
                })
                .collect()
        })
        .unwrap_or_default()
}
