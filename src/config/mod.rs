//! Authentication configuration loaded from the environment.
//!
//! | Variable          | Required | Meaning                                  |
//! |-------------------|----------|------------------------------------------|
//! | `JWT_KEY`         | yes      | HMAC secret used to sign access tokens   |
//! | `TOKEN_TTL_HOURS` | no       | Token lifetime in hours (default 24)     |
//! | `BCRYPT_COST`     | no       | bcrypt work factor, 4 to 31 (default 12) |
//! | `ROOT_USERNAME`   | no       | Root account name, needs `ROOT_PASSWORD` |
//! | `ROOT_PASSWORD`   | no       | Root account password                    |

use crate::user::{
    domain::{Password, Username},
    services::RootCredentials,
};
use chrono::Duration;
use std::fmt;
use thiserror::Error;

/// Default access token lifetime.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("{var} is invalid: {reason}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Only one of `ROOT_USERNAME` and `ROOT_PASSWORD` was provided.
    #[error("ROOT_USERNAME and ROOT_PASSWORD must be set together")]
    IncompleteRootCredentials,
}

/// Authentication settings.
#[derive(Clone)]
pub struct AuthConfig {
    jwt_secret: String,
    token_ttl: Duration,
    bcrypt_cost: u32,
    root: Option<RootCredentials>,
}

impl AuthConfig {
    /// Loads configuration from the process environment, first seeding it from
    /// a `.env` file when one is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "ignoring unreadable .env file");
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing or malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let jwt_secret = read("JWT_KEY").ok_or(ConfigError::Missing("JWT_KEY"))?;

        let ttl_hours = match read("TOKEN_TTL_HOURS") {
            None => DEFAULT_TOKEN_TTL_HOURS,
            Some(raw) => parse_positive_hours(&raw)?,
        };
        let token_ttl = Duration::try_hours(ttl_hours).ok_or_else(|| ConfigError::Invalid {
            var: "TOKEN_TTL_HOURS",
            reason: format!("{ttl_hours} hours is out of range"),
        })?;

        let bcrypt_cost = match read("BCRYPT_COST") {
            None => bcrypt::DEFAULT_COST,
            Some(raw) => parse_bcrypt_cost(&raw)?,
        };

        let root = match (read("ROOT_USERNAME"), read("ROOT_PASSWORD")) {
            (None, None) => None,
            (Some(username), Some(password)) => Some(root_credentials(username, password)?),
            _ => return Err(ConfigError::IncompleteRootCredentials),
        };

        Ok(Self {
            jwt_secret,
            token_ttl,
            bcrypt_cost,
            root,
        })
    }

    /// Returns the token signing secret.
    #[must_use]
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Returns the access token lifetime.
    #[must_use]
    pub const fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Returns the bcrypt work factor.
    #[must_use]
    pub const fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    /// Returns the root account credentials, if configured.
    #[must_use]
    pub const fn root_credentials(&self) -> Option<&RootCredentials> {
        self.root.as_ref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("root", &self.root)
            .finish()
    }
}

fn parse_positive_hours(raw: &str) -> Result<i64, ConfigError> {
    match raw.trim().parse::<i64>() {
        Ok(hours) if hours > 0 => Ok(hours),
        Ok(_) => Err(ConfigError::Invalid {
            var: "TOKEN_TTL_HOURS",
            reason: "must be positive".to_owned(),
        }),
        Err(err) => Err(ConfigError::Invalid {
            var: "TOKEN_TTL_HOURS",
            reason: err.to_string(),
        }),
    }
}

fn parse_bcrypt_cost(raw: &str) -> Result<u32, ConfigError> {
    let cost = raw.trim().parse::<u32>().map_err(|err| ConfigError::Invalid {
        var: "BCRYPT_COST",
        reason: err.to_string(),
    })?;
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(ConfigError::Invalid {
            var: "BCRYPT_COST",
            reason: format!("expected {MIN_BCRYPT_COST} to {MAX_BCRYPT_COST}, got {cost}"),
        });
    }
    Ok(cost)
}

fn root_credentials(username: String, password: String) -> Result<RootCredentials, ConfigError> {
    let username = Username::new(username).map_err(|err| ConfigError::Invalid {
        var: "ROOT_USERNAME",
        reason: err.to_string(),
    })?;
    let password = Password::new(password).map_err(|err| ConfigError::Invalid {
        var: "ROOT_PASSWORD",
        reason: err.to_string(),
    })?;
    Ok(RootCredentials::new(username, password))
}
