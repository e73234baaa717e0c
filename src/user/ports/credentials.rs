//! Password hashing port.

use crate::user::domain::PasswordHash;
use std::sync::Arc;
use thiserror::Error;

/// One-way password hashing and comparison.
pub trait PasswordHasher: Send + Sync {
    /// Produces a salted hash of `plaintext`.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError::Backend`] when hashing fails.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Checks `plaintext` against `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError::Mismatch`] when the password does not
    /// match, or [`PasswordHasherError::Backend`] when the hash cannot be
    /// evaluated.
    fn verify(&self, hash: &PasswordHash, plaintext: &str) -> Result<(), PasswordHasherError>;
}

/// Errors returned by password hashers.
#[derive(Debug, Clone, Error)]
pub enum PasswordHasherError {
    /// The password does not match the hash.
    #[error("password does not match")]
    Mismatch,

    /// The hashing backend failed.
    #[error("password hashing failed: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl PasswordHasherError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
