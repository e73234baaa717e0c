//! Error types for user domain validation.

use crate::access::ParseRoleError;
use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The role is not one of the known roles.
    #[error(transparent)]
    InvalidRole(#[from] ParseRoleError),
}
