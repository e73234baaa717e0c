//! Password values. Neither type prints its contents in `Debug` output.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plaintext password supplied by a caller, non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a validated plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyPassword`] when the value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(UserDomainError::EmptyPassword);
        }
        Ok(Self(raw))
    }

    /// Returns the plaintext for hashing or comparison.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Salted password hash as produced by a password hasher.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an encoded hash.
    #[must_use]
    pub const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Returns the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
