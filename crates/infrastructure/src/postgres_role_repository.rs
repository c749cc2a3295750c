use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use rolegate_application::{CreateRoleInput, RoleRepository, UpdateRoleInput};
use rolegate_core::{AppError, AppResult, NonEmptyString};
use rolegate_domain::{PermissionCode, Role, RoleId};

/// PostgreSQL-backed role store.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|error| AppError::Internal(format!("failed to begin transaction: {error}")))
    }

    async fn find_role_matching(
        &self,
        role_id: Option<Uuid>,
        name: Option<&str>,
    ) -> AppResult<Option<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT
                roles.id AS role_id,
                roles.name AS role_name,
                roles.description,
                roles.is_active,
                grants.permission_code
            FROM roles
            LEFT JOIN role_permissions AS grants
                ON grants.role_id = roles.id
            WHERE ($1::UUID IS NULL OR roles.id = $1)
                AND ($2::TEXT IS NULL OR roles.name = $2)
            ORDER BY grants.permission_code
            "#,
        )
        .bind(role_id)
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find role: {error}")))?;

        Ok(aggregate_roles(rows)?.into_iter().next())
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    role_id: Uuid,
    role_name: String,
    description: Option<String>,
    is_active: bool,
    permission_code: Option<String>,
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let role = Role::new(RoleId::new(), input.name, input.description)?;
        let mut transaction = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO roles (id, name, description, is_active)
            VALUES ($1, $2, $3, true)
            "#,
        )
        .bind(role.id().as_uuid())
        .bind(role.name().as_str())
        .bind(role.description())
        .execute(&mut *transaction)
        .await
        .map_err(|error| map_role_conflict(error, role.name().as_str()))?;

        replace_grants(&mut transaction, role.id(), &input.permissions).await?;
        let role = load_role(&mut transaction, role.id()).await?;
        commit(transaction).await?;

        Ok(role)
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        self.find_role_matching(Some(role_id.as_uuid()), None)
            .await
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        self.find_role_matching(None, Some(name.trim()))
            .await
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT
                roles.id AS role_id,
                roles.name AS role_name,
                roles.description,
                roles.is_active,
                grants.permission_code
            FROM roles
            LEFT JOIN role_permissions AS grants
                ON grants.role_id = roles.id
            ORDER BY roles.name, grants.permission_code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?;

        let mut roles = aggregate_roles(rows)?;
        roles.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(roles)
    }

    async fn update_role(&self, role_id: RoleId, input: UpdateRoleInput) -> AppResult<Role> {
        let mut transaction = self.begin().await?;
        lock_role(&mut transaction, role_id).await?;

        let mut role = load_role(&mut transaction, role_id).await?;
        let name = input.name.unwrap_or_else(|| role.name().to_string());
        let description = match input.description {
            Some(description) => Some(description),
            None => role.description().map(str::to_owned),
        };
        role.rename(name, description)?;

        sqlx::query(
            r#"
            UPDATE roles
            SET name = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_uuid())
        .bind(role.name().as_str())
        .bind(role.description())
        .execute(&mut *transaction)
        .await
        .map_err(|error| map_role_conflict(error, role.name().as_str()))?;

        if let Some(permissions) = &input.permissions {
            replace_grants(&mut transaction, role_id, permissions).await?;
        }

        let role = load_role(&mut transaction, role_id).await?;
        commit(transaction).await?;
        Ok(role)
    }

    async fn replace_role_permissions(
        &self,
        role_id: RoleId,
        codes: &BTreeSet<PermissionCode>,
    ) -> AppResult<Role> {
        let mut transaction = self.begin().await?;
        lock_role(&mut transaction, role_id).await?;
        replace_grants(&mut transaction, role_id, codes).await?;

        let role = load_role(&mut transaction, role_id).await?;
        commit(transaction).await?;
        Ok(role)
    }

    async fn toggle_role_active(&self, role_id: RoleId) -> AppResult<Role> {
        let mut transaction = self.begin().await?;
        let is_active = lock_role(&mut transaction, role_id).await?;

        if is_active {
            let active_dependents = sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*)
                FROM principals
                WHERE role_id = $1 AND is_active
                "#,
            )
            .bind(role_id.as_uuid())
            .fetch_one(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to count role dependents: {error}"))
            })?;

            if active_dependents > 0 {
                return Err(AppError::HasActiveDependents(format!(
                    "role '{role_id}' is assigned to {active_dependents} active principal(s)"
                )));
            }
        }

        sqlx::query(
            r#"
            UPDATE roles
            SET is_active = NOT is_active
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_uuid())
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to toggle role: {error}")))?;

        let role = load_role(&mut transaction, role_id).await?;
        commit(transaction).await?;
        Ok(role)
    }
}

/// Locks the role row for the rest of the transaction and returns its active flag.
async fn lock_role(transaction: &mut Transaction<'_, Postgres>, role_id: RoleId) -> AppResult<bool> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT is_active
        FROM roles
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(role_id.as_uuid())
    .fetch_optional(&mut **transaction)
    .await
    .map_err(|error| AppError::Internal(format!("failed to lock role: {error}")))?
    .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
}

async fn replace_grants(
    transaction: &mut Transaction<'_, Postgres>,
    role_id: RoleId,
    codes: &BTreeSet<PermissionCode>,
) -> AppResult<()> {
    sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
        .bind(role_id.as_uuid())
        .execute(&mut **transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to clear role grants: {error}")))?;

    let codes: Vec<String> = codes.iter().map(|code| code.as_str().to_owned()).collect();
    sqlx::query(
        r#"
        INSERT INTO role_permissions (role_id, permission_code)
        SELECT $1, permissions.code
        FROM permissions
        WHERE permissions.code = ANY($2)
        ON CONFLICT (role_id, permission_code) DO NOTHING
        "#,
    )
    .bind(role_id.as_uuid())
    .bind(codes)
    .execute(&mut **transaction)
    .await
    .map_err(|error| AppError::Internal(format!("failed to persist role grants: {error}")))?;

    Ok(())
}

async fn load_role(transaction: &mut Transaction<'_, Postgres>, role_id: RoleId) -> AppResult<Role> {
    let rows = sqlx::query_as::<_, RoleRow>(
        r#"
        SELECT
            roles.id AS role_id,
            roles.name AS role_name,
            roles.description,
            roles.is_active,
            grants.permission_code
        FROM roles
        LEFT JOIN role_permissions AS grants
            ON grants.role_id = roles.id
        WHERE roles.id = $1
        ORDER BY grants.permission_code
        "#,
    )
    .bind(role_id.as_uuid())
    .fetch_all(&mut **transaction)
    .await
    .map_err(|error| AppError::Internal(format!("failed to load role: {error}")))?;

    aggregate_roles(rows)?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
}

async fn commit(transaction: Transaction<'_, Postgres>) -> AppResult<()> {
    transaction
        .commit()
        .await
        .map_err(|error| AppError::Internal(format!("failed to commit transaction: {error}")))
}

fn aggregate_roles(rows: Vec<RoleRow>) -> AppResult<Vec<Role>> {
    let mut grouped: BTreeMap<Uuid, (RoleRow, BTreeSet<PermissionCode>)> = BTreeMap::new();

    for mut row in rows {
        let grant = row
            .permission_code
            .take()
            .map(|value| {
                PermissionCode::new(value.as_str()).map_err(|error| {
                    AppError::Internal(format!(
                        "invalid stored grant '{value}' for role '{}': {error}",
                        row.role_id
                    ))
                })
            })
            .transpose()?;

        let (_, permissions) = grouped
            .entry(row.role_id)
            .or_insert_with(|| (row, BTreeSet::new()));
        permissions.extend(grant);
    }

    grouped
        .into_values()
        .map(|(row, permissions)| {
            let name = NonEmptyString::new(row.role_name).map_err(|error| {
                AppError::Internal(format!("invalid stored name for role '{}': {error}", row.role_id))
            })?;

            Ok(Role::restore(
                RoleId::from_uuid(row.role_id),
                name,
                row.description,
                row.is_active,
                permissions,
            ))
        })
        .collect()
}

fn map_role_conflict(error: sqlx::Error, role_name: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::DuplicateName(format!("role '{role_name}' already exists"));
    }

    AppError::Internal(format!("failed to persist role: {error}"))
}

#[cfg(test)]
mod tests;
