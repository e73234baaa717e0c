//! HMAC-signed JSON Web Tokens.
//!
//! [`JwtTokenAuthority`] both issues tokens after a successful login and
//! verifies them on later requests. Tokens carry the account identifier,
//! username, role, issue time, and expiry; the password hash is never
//! embedded.

use crate::access::{Claims, Role};
use crate::config::AuthConfig;
use crate::user::{
    domain::{UserId, Username},
    ports::{TokenError, TokenIssuer, TokenSubject, TokenVerifier},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    sub: UserId,
    username: Username,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenAuthority {
    /// Creates an authority signing with `secret`.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Creates an authority from the configured signing secret.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret().as_bytes())
    }
}

impl fmt::Debug for JwtTokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenAuthority").finish_non_exhaustive()
    }
}

impl TokenIssuer for JwtTokenAuthority {
    fn issue(
        &self,
        subject: &TokenSubject,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = JwtClaims {
            sub: subject.user_id,
            username: subject.username.clone(),
            role: subject.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|err| {
            debug!(user_id = %subject.user_id, error = %err, "token signing failed");
            TokenError::issue(err)
        })
    }
}

impl TokenVerifier for JwtTokenAuthority {
    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<JwtClaims>(token, &self.decoding, &self.validation).map_err(|err| {
            debug!(error = %err, "token verification failed");
            match err.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(err.to_string()),
            }
        })?;
        Ok(Claims::new(data.claims.sub, data.claims.role))
    }
}

/// Extracts the token from an `Authorization` header value of the form
/// `Bearer <token>`.
///
/// # Errors
///
/// Returns [`TokenError::MissingBearer`] when the value is not exactly a
/// bearer scheme followed by a token.
pub fn bearer_token(header: &str) -> Result<&str, TokenError> {
    let mut words = header.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some(BEARER_SCHEME), Some(token), None) => Ok(token),
        _ => Err(TokenError::MissingBearer),
    }
}
