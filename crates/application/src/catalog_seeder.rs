use std::collections::BTreeSet;
use std::sync::Arc;

use rolegate_core::{AppError, AppResult};
use rolegate_domain::{AuditAction, PermissionCode, PermissionDefinition, Role};
use tracing::info;

use crate::{
    AuditEvent, AuditRepository, CreateRoleInput, PermissionCatalogRepository, RoleRepository,
};

const SEED_SUBJECT: &str = "system";

/// Outcome of a full bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Number of definitions upserted, duplicates included.
    pub upserted: usize,
    /// Number of permissions in the catalog after seeding.
    pub catalog_size: usize,
    /// Administrative role bound to the full catalog.
    pub admin_role: Role,
}

/// Idempotent bootstrap of the permission catalog and the administrative role.
#[derive(Clone)]
pub struct CatalogSeeder {
    catalog_repository: Arc<dyn PermissionCatalogRepository>,
    role_repository: Arc<dyn RoleRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl CatalogSeeder {
    /// Creates a new seeder.
    #[must_use]
    pub fn new(
        catalog_repository: Arc<dyn PermissionCatalogRepository>,
        role_repository: Arc<dyn RoleRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            catalog_repository,
            role_repository,
            audit_repository,
        }
    }

    /// Upserts a definition tree depth-first and returns the number of upserts.
    pub async fn seed(&self, tree: &PermissionDefinition) -> AppResult<usize> {
        let mut pending: Vec<(&PermissionDefinition, Option<PermissionCode>)> = vec![(tree, None)];
        let mut upserted = 0;

        while let Some((definition, parent)) = pending.pop() {
            let permission = self
                .catalog_repository
                .upsert_permission(&definition.code, &definition.label, parent.as_ref())
                .await?;
            upserted += 1;

            for child in definition.children.iter().rev() {
                pending.push((child, Some(permission.code().clone())));
            }
        }

        Ok(upserted)
    }

    /// Gets or creates the named role and grants it the complete current catalog.
    pub async fn ensure_admin_role(
        &self,
        name: &str,
        description: Option<String>,
    ) -> AppResult<Role> {
        let role = match self.role_repository.find_role_by_name(name).await? {
            Some(role) => role,
            None => self.create_admin_role(name, description).await?,
        };

        let codes: BTreeSet<PermissionCode> = self
            .catalog_repository
            .list_permissions()
            .await?
            .into_iter()
            .map(|permission| permission.code().clone())
            .collect();

        self.role_repository
            .replace_role_permissions(role.id(), &codes)
            .await
    }

    /// Seeds the tree, binds the administrative role and records the run.
    pub async fn seed_all(
        &self,
        tree: &PermissionDefinition,
        admin_role_name: &str,
    ) -> AppResult<SeedReport> {
        let upserted = self.seed(tree).await?;
        let admin_role = self
            .ensure_admin_role(
                admin_role_name,
                Some("Holds every permission in the catalog".to_owned()),
            )
            .await?;
        let catalog_size = admin_role.permissions().len();

        self.audit_repository
            .append_event(AuditEvent {
                subject: SEED_SUBJECT.to_owned(),
                action: AuditAction::CatalogSeeded,
                resource_type: "permission_catalog".to_owned(),
                resource_id: tree.code.to_string(),
                detail: Some(format!(
                    "upserted {upserted} definitions, catalog holds {catalog_size} permissions"
                )),
            })
            .await?;

        info!(
            upserted,
            catalog_size,
            admin_role = %admin_role.name(),
            "permission catalog seeded"
        );

        Ok(SeedReport {
            upserted,
            catalog_size,
            admin_role,
        })
    }

    async fn create_admin_role(&self, name: &str, description: Option<String>) -> AppResult<Role> {
        let created = self
            .role_repository
            .create_role(CreateRoleInput {
                name: name.to_owned(),
                description,
                permissions: BTreeSet::new(),
            })
            .await;

        match created {
            Ok(role) => Ok(role),
            // A concurrent run created it first.
            Err(AppError::DuplicateName(_)) => self
                .role_repository
                .find_role_by_name(name)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("role '{name}' does not exist"))),
            Err(error) => Err(error),
        }
    }
}
