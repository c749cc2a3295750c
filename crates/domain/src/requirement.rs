use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EffectivePermissions, PermissionCode, Principal, Role};

/// What an operation demands from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum Requirement {
    /// Any authenticated, active caller may proceed.
    Public,
    /// The caller must hold this code.
    Code(PermissionCode),
}

impl Requirement {
    /// Returns the required code, `None` for public operations.
    #[must_use]
    pub fn code(&self) -> Option<&PermissionCode> {
        match self {
            Self::Public => None,
            Self::Code(code) => Some(code),
        }
    }
}

/// Typed operation table of one resource.
///
/// Implementors are enums whose `required_code` match is exhaustive, so adding an
/// operation forces a decision about its requirement. Returning `None` is the explicit
/// way to declare an operation public.
pub trait ResourceOperation: Copy + Send + Sync + 'static {
    /// Stable resource name used for registration.
    const RESOURCE: &'static str;

    /// Every operation of the resource.
    fn all() -> &'static [Self];

    /// Stable operation name (`list`, `retrieve`, `toggle_status`, ...).
    fn name(&self) -> &'static str;

    /// Code required by the operation, `None` when public.
    fn required_code(&self) -> Option<&'static str>;

    /// Returns the operation requirement.
    fn requirement(&self) -> Requirement {
        self.required_code()
            .map(|code| Requirement::Code(PermissionCode::from_static(code)))
            .unwrap_or(Requirement::Public)
    }
}

/// Operation name to required code lookup for name-based dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementMap {
    entries: BTreeMap<String, PermissionCode>,
}

impl RequirementMap {
    /// Creates an empty map; every operation is public.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from a typed operation table, skipping public operations.
    #[must_use]
    pub fn from_operations<O: ResourceOperation>() -> Self {
        let mut map = Self::new();
        for operation in O::all() {
            if let Some(code) = operation.required_code() {
                map.insert(operation.name(), PermissionCode::from_static(code));
            }
        }

        map
    }

    /// Declares the code required by an operation, replacing any previous entry.
    pub fn insert(&mut self, operation: impl Into<String>, code: PermissionCode) {
        self.entries.insert(operation.into(), code);
    }

    /// Builder form of [`RequirementMap::insert`].
    #[must_use]
    pub fn with(mut self, operation: impl Into<String>, code: PermissionCode) -> Self {
        self.insert(operation, code);
        self
    }

    /// Resolves an operation; undeclared operations are public.
    #[must_use]
    pub fn requirement_for(&self, operation: &str) -> Requirement {
        self.entries
            .get(operation)
            .cloned()
            .map(Requirement::Code)
            .unwrap_or(Requirement::Public)
    }

    /// Iterates over declared entries ordered by operation name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PermissionCode)> {
        self.entries
            .iter()
            .map(|(operation, code)| (operation.as_str(), code))
    }

    /// Returns the number of restricted operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no operation is restricted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Authorization configuration of a resource, fixed at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthorizationConfig {
    /// Single-purpose endpoint guarded by one code whatever the operation.
    SinglePermission {
        /// Required code.
        code: PermissionCode,
    },
    /// Multi-operation resource resolved per operation name.
    PerOperation {
        /// Operation table.
        map: RequirementMap,
    },
}

impl AuthorizationConfig {
    /// Creates a single-permission config.
    #[must_use]
    pub fn single(code: PermissionCode) -> Self {
        Self::SinglePermission { code }
    }

    /// Creates a per-operation config from a typed operation table.
    #[must_use]
    pub fn per_operation<O: ResourceOperation>() -> Self {
        Self::PerOperation {
            map: RequirementMap::from_operations::<O>(),
        }
    }

    /// Resolves the requirement for an optional operation name.
    #[must_use]
    pub fn requirement_for(&self, operation: Option<&str>) -> Requirement {
        match (self, operation) {
            (Self::SinglePermission { code }, _) => Requirement::Code(code.clone()),
            (Self::PerOperation { map }, Some(operation)) => map.requirement_for(operation),
            (Self::PerOperation { .. }, None) => Requirement::Public,
        }
    }
}

impl EffectivePermissions {
    /// Resolves the effective set of a principal given its currently assigned role.
    ///
    /// The role's own active flag is not consulted: a holder of a deactivated role keeps
    /// the codes last assigned to it.
    #[must_use]
    pub fn resolve(principal: &Principal, role: Option<&Role>) -> Self {
        if !principal.is_eligible() {
            return Self::None;
        }

        if principal.is_superuser() {
            return Self::All;
        }

        match (principal.role_id(), role) {
            (Some(role_id), Some(role)) if role.id() == role_id => {
                Self::Codes(role.permissions().clone())
            }
            _ => Self::None,
        }
    }
}

/// Decides whether a principal may perform an operation with the given requirement.
///
/// Pure function: no I/O, no side effects.
#[must_use]
pub fn decide(
    principal: &Principal,
    permissions: &EffectivePermissions,
    requirement: &Requirement,
) -> bool {
    if !principal.is_eligible() {
        return false;
    }

    match requirement {
        Requirement::Public => true,
        Requirement::Code(code) => permissions.contains(code),
    }
}
