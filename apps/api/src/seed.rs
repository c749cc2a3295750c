use rolegate_application::SeedReport;
use rolegate_core::AppResult;
use rolegate_domain::{Principal, canonical_permission_tree};
use tracing::info;

use crate::api_config::ApiConfig;
use crate::api_services::ApiServices;

/// Seeds the canonical catalog, binds the admin role and records the bootstrap superuser.
pub async fn run(services: &ApiServices, config: &ApiConfig) -> AppResult<SeedReport> {
    let report = services
        .catalog_seeder
        .seed_all(&canonical_permission_tree(), &config.admin_role_name)
        .await?;

    if let Some(subject) = config.seed_superuser_subject.as_deref() {
        let principal =
            Principal::authenticated(subject, true, true, Some(report.admin_role.id()))?;
        services
            .app_state
            .principal_admin_service
            .record_principal(&principal)
            .await?;
        info!(subject, "bootstrap superuser recorded");
    }

    Ok(report)
}
