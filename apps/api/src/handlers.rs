use std::collections::BTreeSet;
use std::str::FromStr;

use rolegate_core::AppResult;
use rolegate_domain::{PermissionCode, RoleId};

pub mod audit;
pub mod authorization;
pub mod health;
pub mod principals;
pub mod roles;

#[cfg(test)]
mod tests;

fn parse_role_id(value: &str) -> AppResult<RoleId> {
    RoleId::from_str(value.trim())
}

fn parse_codes(values: Vec<String>) -> AppResult<BTreeSet<PermissionCode>> {
    values.into_iter().map(PermissionCode::new).collect()
}
