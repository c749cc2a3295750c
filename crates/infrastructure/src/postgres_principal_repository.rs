use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use rolegate_application::PrincipalRepository;
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{Principal, RoleId};

/// PostgreSQL-backed principal records.
#[derive(Clone)]
pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PrincipalRow {
    subject: String,
    is_superuser: bool,
    is_active: bool,
    role_id: Option<Uuid>,
}

impl PrincipalRow {
    fn into_principal(self) -> AppResult<Principal> {
        Principal::authenticated(
            self.subject,
            self.is_superuser,
            self.is_active,
            self.role_id.map(RoleId::from_uuid),
        )
        .map_err(|error| AppError::Internal(format!("invalid stored principal: {error}")))
    }
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>> {
        sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT subject, is_superuser, is_active, role_id
            FROM principals
            WHERE subject = $1
            "#,
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find principal: {error}")))?
        .map(PrincipalRow::into_principal)
        .transpose()
    }

    async fn save_principal(&self, principal: &Principal) -> AppResult<()> {
        let Some(subject) = principal.subject() else {
            return Err(AppError::Validation(
                "anonymous principals cannot be stored".to_owned(),
            ));
        };

        sqlx::query(
            r#"
            INSERT INTO principals (subject, is_superuser, is_active, role_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (subject) DO UPDATE
            SET is_superuser = EXCLUDED.is_superuser,
                is_active = EXCLUDED.is_active,
                role_id = EXCLUDED.role_id
            "#,
        )
        .bind(subject)
        .bind(principal.is_superuser())
        .bind(principal.is_active())
        .bind(principal.role_id().map(|role_id| role_id.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            if let sqlx::Error::Database(database_error) = &error
                && database_error.code().as_deref() == Some("23503")
            {
                return AppError::NotFound(format!(
                    "role assigned to principal '{subject}' does not exist"
                ));
            }

            AppError::Internal(format!("failed to save principal: {error}"))
        })?;

        Ok(())
    }

    async fn assign_role(&self, subject: &str, role_id: Option<RoleId>) -> AppResult<Principal> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        if let Some(role_id) = role_id {
            // Shares the row lock taken by role deactivation.
            let is_active = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT is_active
                FROM roles
                WHERE id = $1
                FOR SHARE
                "#,
            )
            .bind(role_id.as_uuid())
            .fetch_optional(&mut *transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to resolve role: {error}")))?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))?;

            if !is_active {
                return Err(AppError::Validation(format!(
                    "role '{role_id}' is inactive and cannot be assigned"
                )));
            }
        }

        let principal = sqlx::query_as::<_, PrincipalRow>(
            r#"
            UPDATE principals
            SET role_id = $2
            WHERE subject = $1
            RETURNING subject, is_superuser, is_active, role_id
            "#,
        )
        .bind(subject)
        .bind(role_id.map(|role_id| role_id.as_uuid()))
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to assign role: {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("principal '{subject}' does not exist")))?
        .into_principal()?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(principal)
    }

    async fn toggle_principal_active(&self, subject: &str) -> AppResult<Principal> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        // Reactivating a holder must not slip past a concurrent role deactivation.
        sqlx::query(
            r#"
            SELECT roles.id
            FROM principals
            INNER JOIN roles
                ON roles.id = principals.role_id
            WHERE principals.subject = $1
            FOR SHARE OF roles
            "#,
        )
        .bind(subject)
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to lock principal role: {error}")))?;

        let principal = sqlx::query_as::<_, PrincipalRow>(
            r#"
            UPDATE principals
            SET is_active = NOT is_active
            WHERE subject = $1
            RETURNING subject, is_superuser, is_active, role_id
            "#,
        )
        .bind(subject)
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to toggle principal: {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("principal '{subject}' does not exist")))?
        .into_principal()?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(principal)
    }
}
