//! Bcrypt-backed password hasher.

use crate::config::AuthConfig;
use crate::user::{
    domain::PasswordHash,
    ports::{PasswordHasher, PasswordHasherError},
};
use tracing::warn;

/// Password hasher using bcrypt with a configurable work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Creates a hasher with the given bcrypt cost.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Creates a hasher using the configured cost.
    #[must_use]
    pub const fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.bcrypt_cost())
    }

    /// Returns the bcrypt cost.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHasherError> {
        bcrypt::hash(plaintext, self.cost)
            .map(PasswordHash::new)
            .map_err(|err| {
                warn!(cost = self.cost, error = %err, "bcrypt hashing failed");
                PasswordHasherError::backend(err)
            })
    }

    fn verify(&self, hash: &PasswordHash, plaintext: &str) -> Result<(), PasswordHasherError> {
        match bcrypt::verify(plaintext, hash.as_str()) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PasswordHasherError::Mismatch),
            Err(err) => {
                warn!(error = %err, "stored password hash could not be evaluated");
                Err(PasswordHasherError::backend(err))
            }
        }
    }
}
