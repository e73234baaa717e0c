//! Account roles and their ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Account role. Variants are ordered by privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular self-registered account.
    User,
    /// Administrator of regular accounts.
    Admin,
    /// The deployment's single unrestricted account.
    Root,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Root => "root",
        }
    }

    /// Returns `true` for roles that may act on any task.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Root)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "root" => Ok(Self::Root),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Error returned while parsing a role string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid role '{0}', expected one of: user, admin, root")]
pub struct ParseRoleError(pub String);
