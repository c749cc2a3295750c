use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rolegate_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PermissionCode;

/// Stable role identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(Uuid);

impl RoleId {
    /// Creates a random role identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a role identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for RoleId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid role id '{value}': {error}")))
    }
}

/// Named, togglable bundle of permission codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    description: Option<String>,
    is_active: bool,
    permissions: BTreeSet<PermissionCode>,
}

impl Role {
    /// Creates a new active role without grants.
    pub fn new(id: RoleId, name: impl Into<String>, description: Option<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            description: normalize_description(description),
            is_active: true,
            permissions: BTreeSet::new(),
        })
    }

    /// Rebuilds a role from persisted values.
    #[must_use]
    pub fn restore(
        id: RoleId,
        name: NonEmptyString,
        description: Option<String>,
        is_active: bool,
        permissions: BTreeSet<PermissionCode>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            is_active,
            permissions,
        }
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the unique role name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the role is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the granted permission codes.
    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<PermissionCode> {
        &self.permissions
    }

    /// Renames the role and replaces its description.
    pub fn rename(&mut self, name: impl Into<String>, description: Option<String>) -> AppResult<()> {
        self.name = NonEmptyString::new(name)?;
        self.description = normalize_description(description);
        Ok(())
    }

    /// Replaces the granted codes wholesale.
    pub fn replace_permissions(&mut self, permissions: BTreeSet<PermissionCode>) {
        self.permissions = permissions;
    }

    /// Flips the active flag and returns the new value.
    pub fn toggle_active(&mut self) -> bool {
        self.is_active = !self.is_active;
        self.is_active
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
