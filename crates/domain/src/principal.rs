use std::collections::BTreeSet;

use rolegate_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{PermissionCode, RoleId};

/// The caller whose effective permission set is evaluated.
///
/// Owned by the identity subsystem; only the authorization-relevant attributes live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    subject: Option<String>,
    is_authenticated: bool,
    is_superuser: bool,
    is_active: bool,
    role_id: Option<RoleId>,
}

impl Principal {
    /// Returns the unauthenticated caller.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            subject: None,
            is_authenticated: false,
            is_superuser: false,
            is_active: false,
            role_id: None,
        }
    }

    /// Creates an authenticated principal.
    pub fn authenticated(
        subject: impl Into<String>,
        is_superuser: bool,
        is_active: bool,
        role_id: Option<RoleId>,
    ) -> AppResult<Self> {
        let subject = subject.into();
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(AppError::Validation(
                "principal subject must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            subject: Some(subject.to_owned()),
            is_authenticated: true,
            is_superuser,
            is_active,
            role_id,
        })
    }

    /// Returns the subject, `None` for anonymous callers.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns a printable subject for logs and audit rows.
    #[must_use]
    pub fn display_subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("anonymous")
    }

    /// Returns whether the caller passed authentication.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Returns whether the caller bypasses role checks.
    #[must_use]
    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    /// Returns whether the account is enabled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the assigned role, if any.
    #[must_use]
    pub fn role_id(&self) -> Option<RoleId> {
        self.role_id
    }

    /// Returns whether the caller may be granted anything at all.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.is_authenticated && self.is_active
    }

    /// Assigns or clears the role.
    pub fn set_role(&mut self, role_id: Option<RoleId>) {
        self.role_id = role_id;
    }

    /// Flips the active flag and returns the new value.
    pub fn toggle_active(&mut self) -> bool {
        self.is_active = !self.is_active;
        self.is_active
    }
}

/// Effective permission set of a principal at decision time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectivePermissions {
    /// Grants nothing.
    None,
    /// Grants every code, including codes absent from the catalog.
    All,
    /// Grants exactly these codes.
    Codes(BTreeSet<PermissionCode>),
}

impl EffectivePermissions {
    /// Returns whether the set contains the code.
    #[must_use]
    pub fn contains(&self, code: &PermissionCode) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Codes(codes) => codes.contains(code),
        }
    }

    /// Returns whether the set is the universal set.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns the enumerated codes; empty for `None` and `All`.
    #[must_use]
    pub fn codes(&self) -> Vec<&PermissionCode> {
        match self {
            Self::Codes(codes) => codes.iter().collect(),
            Self::None | Self::All => Vec::new(),
        }
    }
}
