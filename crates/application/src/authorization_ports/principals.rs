use async_trait::async_trait;

use rolegate_core::AppResult;
use rolegate_domain::{Principal, RoleId};

/// Repository port for the authorization-relevant side of user accounts.
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Finds an authenticated principal by subject.
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>>;

    /// Inserts or replaces a principal record.
    async fn save_principal(&self, principal: &Principal) -> AppResult<()>;

    /// Assigns or clears the principal role.
    ///
    /// Assigning an inactive role fails with `Validation`. The role state is read under
    /// the same lock the deactivation guard takes.
    async fn assign_role(&self, subject: &str, role_id: Option<RoleId>) -> AppResult<Principal>;

    /// Flips the principal active flag.
    async fn toggle_principal_active(&self, subject: &str) -> AppResult<Principal>;
}
