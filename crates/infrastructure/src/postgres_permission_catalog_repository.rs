use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use rolegate_application::PermissionCatalogRepository;
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{Permission, PermissionCode};

/// PostgreSQL-backed permission catalog.
#[derive(Clone)]
pub struct PostgresPermissionCatalogRepository {
    pool: PgPool,
}

impl PostgresPermissionCatalogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    code: String,
    label: String,
    parent_code: Option<String>,
}

impl TryFrom<PermissionRow> for Permission {
    type Error = AppError;

    fn try_from(row: PermissionRow) -> Result<Self, Self::Error> {
        let code = PermissionCode::new(row.code.as_str()).map_err(|error| {
            AppError::Internal(format!("invalid stored permission '{}': {error}", row.code))
        })?;
        let parent = row
            .parent_code
            .map(PermissionCode::new)
            .transpose()
            .map_err(|error| {
                AppError::Internal(format!(
                    "invalid stored parent of permission '{}': {error}",
                    row.code
                ))
            })?;

        Permission::new(code, row.label, parent)
    }
}

#[async_trait]
impl PermissionCatalogRepository for PostgresPermissionCatalogRepository {
    async fn upsert_permission(
        &self,
        code: &PermissionCode,
        label: &str,
        parent: Option<&PermissionCode>,
    ) -> AppResult<Permission> {
        let permission = Permission::new(code.clone(), label, parent.cloned())?;

        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        // Catalog writers are serialized so concurrent re-parenting cannot close a cycle.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext('permissions'))")
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to lock permission catalog: {error}"))
            })?;

        if let Some(parent) = parent {
            let closes_cycle = sqlx::query_scalar::<_, Option<bool>>(
                r#"
                WITH RECURSIVE ancestors AS (
                    SELECT code, parent_code
                    FROM permissions
                    WHERE code = $1
                    UNION ALL
                    SELECT permissions.code, permissions.parent_code
                    FROM permissions
                    INNER JOIN ancestors
                        ON permissions.code = ancestors.parent_code
                )
                SELECT bool_or(code = $2)
                FROM ancestors
                "#,
            )
            .bind(parent.as_str())
            .bind(code.as_str())
            .fetch_one(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to resolve permission ancestors: {error}"))
            })?;

            match closes_cycle {
                None => {
                    return Err(AppError::NotFound(format!(
                        "parent permission '{parent}' does not exist"
                    )));
                }
                Some(true) => {
                    return Err(AppError::Validation(format!(
                        "moving permission '{code}' under '{parent}' would create a cycle"
                    )));
                }
                Some(false) => {}
            }
        }

        let written = sqlx::query(
            r#"
            INSERT INTO permissions (code, label, parent_code)
            VALUES ($1, $2, $3)
            ON CONFLICT (code) DO UPDATE
            SET label = EXCLUDED.label,
                parent_code = EXCLUDED.parent_code
            WHERE permissions.label IS DISTINCT FROM EXCLUDED.label
                OR permissions.parent_code IS DISTINCT FROM EXCLUDED.parent_code
            "#,
        )
        .bind(permission.code().as_str())
        .bind(permission.label().as_str())
        .bind(permission.parent().map(PermissionCode::as_str))
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to upsert permission: {error}")))?
        .rows_affected();

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        if written > 0 {
            debug!(code = %permission.code(), "permission catalog entry written");
        }

        Ok(permission)
    }

    async fn find_permission(&self, code: &PermissionCode) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT code, label, parent_code
            FROM permissions
            WHERE code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find permission: {error}")))?
        .map(Permission::try_from)
        .transpose()
    }

    async fn list_children(&self, parent: Option<&PermissionCode>) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT code, label, parent_code
            FROM permissions
            WHERE parent_code IS NOT DISTINCT FROM $1
            ORDER BY position
            "#,
        )
        .bind(parent.map(PermissionCode::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list permission children: {error}"))
        })?;

        rows.into_iter().map(Permission::try_from).collect()
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT code, label, parent_code
            FROM permissions
            ORDER BY position
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list permissions: {error}")))?;

        rows.into_iter().map(Permission::try_from).collect()
    }
}
