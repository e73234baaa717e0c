//! Policy error value returned to controllers.
//!
//! Every policy operation that can fail returns a [`PolicyError`] carrying a
//! classification, a transport status hint, and a human-readable message. The
//! collaborator failure that caused it, if any, is kept as the error source.

use crate::access::DenyReason;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Classification of a policy failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required input field is missing or invalid.
    Validation,
    /// The requested entity does not exist.
    NotFound,
    /// The actor is not allowed to perform the operation.
    Forbidden,
    /// The write would violate a uniqueness constraint.
    Conflict,
    /// The presented credentials were rejected.
    Unauthorized,
    /// Hashing or token issuance failed.
    Internal,
    /// A store collaborator failed.
    Store,
}

impl ErrorKind {
    /// Returns the HTTP status code a transport boundary should use.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal | Self::Store => 500,
        }
    }

    /// Returns a stable lowercase label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::Internal => "internal",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type SharedSource = Arc<dyn std::error::Error + Send + Sync>;

/// Tagged failure returned by task and user policies.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PolicyError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<SharedSource>,
}

/// Result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

impl PolicyError {
    /// Creates an error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the collaborator error that caused this failure.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Creates a [`ErrorKind::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Creates a [`ErrorKind::NotFound`] error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a [`ErrorKind::Forbidden`] error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Creates a [`ErrorKind::Conflict`] error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Creates a [`ErrorKind::Unauthorized`] error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Wraps a hashing or token failure as [`ErrorKind::Internal`].
    pub fn internal(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::new(ErrorKind::Internal, "internal server error").with_source(source)
    }

    /// Wraps a store failure as [`ErrorKind::Store`].
    pub fn store(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::new(ErrorKind::Store, "internal server error").with_source(source)
    }

    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the status code hint for the transport boundary.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DenyReason> for PolicyError {
    fn from(reason: DenyReason) -> Self {
        Self::forbidden(reason.to_string())
    }
}
