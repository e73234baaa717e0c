//! Token issuing and verification ports.

use crate::access::{Claims, Role};
use crate::user::domain::{User, UserId, Username};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Identity embedded in an issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    /// Account identifier.
    pub user_id: UserId,
    /// Login name.
    pub username: Username,
    /// Account role at issue time.
    pub role: Role,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id(),
            username: user.username().clone(),
            role: user.role(),
        }
    }
}

/// Issues signed access tokens.
pub trait TokenIssuer: Send + Sync {
    /// Issues a token for `subject` stamped with `issued_at` and valid until
    /// `expires_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Issue`] when signing fails.
    fn issue(
        &self,
        subject: &TokenSubject,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, TokenError>;
}

/// Verifies access tokens and recovers the actor's claims.
pub trait TokenVerifier: Send + Sync {
    /// Verifies `token` and returns the claims it carries.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] for expired tokens and
    /// [`TokenError::Invalid`] for any other verification failure.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// Errors returned by token issuers and verifiers.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// The token could not be signed.
    #[error("token issuance failed: {0}")]
    Issue(Arc<dyn std::error::Error + Send + Sync>),

    /// The token has expired.
    #[error("token has expired")]
    Expired,

    /// The token is malformed, has a bad signature, or carries bad claims.
    #[error("invalid token: {0}")]
    Invalid(String),

    /// The authorization header is not a bearer credential.
    #[error("bearer token required")]
    MissingBearer,
}

impl TokenError {
    /// Wraps a signing error.
    pub fn issue(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Issue(Arc::new(err))
    }
}
