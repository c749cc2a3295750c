//! Rolegate API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod seed;
mod state;

use std::sync::Arc;

use rolegate_core::AppError;
use rolegate_infrastructure::InMemoryAuthorizationStore;
use tracing::info;

use crate::api_config::{ApiCommand, ApiConfig, StorageBackend};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;

    let services = match &config.storage {
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = api_services::connect_and_migrate(database_url, *max_connections).await?;
            if config.command == ApiCommand::Migrate {
                info!("migrations applied successfully");
                return Ok(());
            }

            api_services::build_postgres_services(&pool, config.principal_header.clone())?
        }
        StorageBackend::Memory => {
            let services = api_services::build_memory_services(
                Arc::new(InMemoryAuthorizationStore::new()),
                config.principal_header.clone(),
            )?;
            seed::run(&services, &config).await?;
            services
        }
    };

    if config.command == ApiCommand::Seed {
        let report = seed::run(&services, &config).await?;
        info!(
            upserted = report.upserted,
            catalog_size = report.catalog_size,
            "seed completed"
        );
        return Ok(());
    }

    let app = api_router::build_router(services.app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind API listener: {error}")))?;

    info!(%address, "rolegate api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("API server failed: {error}")))
}
