use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rolegate_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Stable, globally unique permission identifier.
///
/// Codes are opaque: no hierarchy is implied by their spelling, and holding a
/// parent code grants nothing about its children (or the other way around).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionCode(String);

impl PermissionCode {
    /// Creates a validated permission code.
    ///
    /// Codes must be non-empty and must not contain whitespace.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "permission code must not be empty".to_owned(),
            ));
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(format!(
                "permission code '{trimmed}' must not contain whitespace"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps a code declared as a compile-time constant.
    ///
    /// Declared constants are checked by the catalog tests instead of at runtime.
    #[must_use]
    pub fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for PermissionCode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for PermissionCode {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PermissionCode> for String {
    fn from(value: PermissionCode) -> Self {
        value.0
    }
}

impl Display for PermissionCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// A node of the permission catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    code: PermissionCode,
    label: NonEmptyString,
    parent: Option<PermissionCode>,
}

impl Permission {
    /// Creates a permission node.
    pub fn new(
        code: PermissionCode,
        label: impl Into<String>,
        parent: Option<PermissionCode>,
    ) -> AppResult<Self> {
        if parent.as_ref() == Some(&code) {
            return Err(AppError::Validation(format!(
                "permission '{code}' cannot be its own parent"
            )));
        }

        Ok(Self {
            code,
            label: NonEmptyString::new(label)?,
            parent,
        })
    }

    /// Returns the stable permission code.
    #[must_use]
    pub fn code(&self) -> &PermissionCode {
        &self.code
    }

    /// Returns the human-readable label.
    #[must_use]
    pub fn label(&self) -> &NonEmptyString {
        &self.label
    }

    /// Returns the parent code, `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<&PermissionCode> {
        self.parent.as_ref()
    }

    /// Returns whether an upsert with these values would change the stored node.
    #[must_use]
    pub fn differs_from(&self, label: &str, parent: Option<&PermissionCode>) -> bool {
        self.label.as_str() != label || self.parent.as_ref() != parent
    }
}

/// Nested definition of a permission subtree, as supplied to the seeder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDefinition {
    /// Human-readable label.
    pub label: String,
    /// Stable code.
    pub code: PermissionCode,
    /// Child definitions, upserted under this node.
    #[serde(default)]
    pub children: Vec<PermissionDefinition>,
}

impl PermissionDefinition {
    /// Creates a leaf definition.
    #[must_use]
    pub fn leaf(code: &'static str, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: PermissionCode::from_static(code),
            children: Vec::new(),
        }
    }

    /// Creates a branch definition.
    #[must_use]
    pub fn branch(
        code: &'static str,
        label: impl Into<String>,
        children: Vec<PermissionDefinition>,
    ) -> Self {
        Self {
            label: label.into(),
            code: PermissionCode::from_static(code),
            children,
        }
    }

    /// Returns every code of the subtree in depth-first order, duplicates included.
    #[must_use]
    pub fn codes(&self) -> Vec<&PermissionCode> {
        let mut codes = vec![&self.code];
        for child in &self.children {
            codes.extend(child.codes());
        }

        codes
    }
}

/// Materialized permission tree node returned for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTreeNode {
    /// Human-readable label.
    pub label: String,
    /// Stable code.
    pub code: String,
    /// Direct children.
    pub children: Vec<PermissionTreeNode>,
}
