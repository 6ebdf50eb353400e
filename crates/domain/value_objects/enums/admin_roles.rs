use std::fmt::Display;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    #[default]
    Admin,
    Manager,
}

impl Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Admin => "admin",
            AdminRole::Manager => "manager",
        };
        write!(f, "{}", role)
    }
}

impl AdminRole {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "super_admin" => Ok(AdminRole::SuperAdmin),
            "admin" => Ok(AdminRole::Admin),
            "manager" => Ok(AdminRole::Manager),
            other => bail!("Unknown admin role: {}", other),
        }
    }

    /// Whether an account holding `self` may edit or delete an account holding
    /// `target`. Self-management is decided by the caller, not here.
    pub fn can_manage(&self, target: AdminRole) -> bool {
        match self {
            AdminRole::SuperAdmin => true,
            AdminRole::Admin => target != AdminRole::SuperAdmin,
            AdminRole::Manager => false,
        }
    }
}
