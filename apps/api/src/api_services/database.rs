use std::time::Duration;

use rolegate_core::AppError;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("../../crates/infrastructure/migrations");

/// Opens the authorization store pool and brings its schema up to date.
pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to connect to authorization store: {error}"))
        })?;

    MIGRATOR.run(&pool).await.map_err(|error| {
        AppError::Internal(format!("failed to migrate authorization store: {error}"))
    })?;
    info!(
        max_connections,
        migrations = MIGRATOR.iter().count(),
        "authorization store ready"
    );

    Ok(pool)
}
