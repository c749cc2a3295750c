use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use rolegate_core::{AppError, AppResult};
use rolegate_domain::resources::declared_resources;
use rolegate_domain::{AuthorizationConfig, Requirement};

/// Authorization configs of every resource, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: BTreeMap<String, AuthorizationConfig>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every resource declared by the backend.
    pub fn with_declared_resources() -> AppResult<Self> {
        let mut registry = Self::new();
        for (resource, config) in declared_resources() {
            registry.register(resource, config)?;
        }

        Ok(registry)
    }

    /// Registers a resource config. A resource can only be registered once.
    pub fn register(
        &mut self,
        resource: impl Into<String>,
        config: AuthorizationConfig,
    ) -> AppResult<()> {
        match self.resources.entry(resource.into()) {
            Entry::Occupied(entry) => Err(AppError::Conflict(format!(
                "resource '{}' is already registered",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(config);
                Ok(())
            }
        }
    }

    /// Returns the config of a registered resource.
    #[must_use]
    pub fn config_for(&self, resource: &str) -> Option<&AuthorizationConfig> {
        self.resources.get(resource)
    }

    /// Resolves the requirement of an operation. Unregistered resources are public.
    #[must_use]
    pub fn requirement_for(&self, resource: &str, operation: Option<&str>) -> Requirement {
        self.config_for(resource)
            .map(|config| config.requirement_for(operation))
            .unwrap_or(Requirement::Public)
    }

    /// Iterates registered resources ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorizationConfig)> {
        self.resources
            .iter()
            .map(|(resource, config)| (resource.as_str(), config))
    }

    /// Returns the number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns whether no resource is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rolegate_core::AppError;
    use rolegate_domain::resources::{AUDIT_LOG_RESOURCE, RoleOperation};
    use rolegate_domain::{AuthorizationConfig, PermissionCode, Requirement, ResourceOperation};

    use super::ResourceRegistry;

    #[test]
    fn duplicate_registration_is_a_conflict() {
        let mut registry = ResourceRegistry::new();
        let first = registry.register(
            "reports",
            AuthorizationConfig::single(PermissionCode::from_static("reports.read")),
        );
        assert!(first.is_ok());

        let second = registry.register("reports", AuthorizationConfig::per_operation::<RoleOperation>());
        assert!(matches!(second, Err(AppError::Conflict(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn declared_resources_register_cleanly() {
        let registry = ResourceRegistry::with_declared_resources().unwrap_or_default();
        assert!(registry.config_for(RoleOperation::RESOURCE).is_some());
        assert_eq!(
            registry.requirement_for(AUDIT_LOG_RESOURCE, Some("list")),
            Requirement::Code(PermissionCode::from_static("audit.global_history.read"))
        );
    }

    #[test]
    fn unknown_resource_resolves_to_public() {
        let registry = ResourceRegistry::with_declared_resources().unwrap_or_default();
        assert_eq!(
            registry.requirement_for("chat", Some("send")),
            Requirement::Public
        );
    }
}
