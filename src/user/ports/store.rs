//! Store port for user persistence.

use crate::user::domain::{User, UserId, UserPatch, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user store operations.
pub type UserStoreResult<T> = Result<T, UserStoreError>;

/// User persistence contract.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::DuplicateUser`] when the identifier is taken
    /// or [`UserStoreError::DuplicateUsername`] when the username is taken.
    async fn insert(&self, user: &User) -> UserStoreResult<()>;

    /// Returns every stored user.
    async fn list_all(&self) -> UserStoreResult<Vec<User>>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserStoreResult<Option<User>>;

    /// Finds a user by exact username.
    ///
    /// Returns `None` when no user holds the username.
    async fn find_by_username(&self, username: &Username) -> UserStoreResult<Option<User>>;

    /// Writes only the fields set in `patch`.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::NotFound`] when the user does not exist.
    async fn apply_patch(&self, id: UserId, patch: &UserPatch) -> UserStoreResult<()>;

    /// Removes a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::NotFound`] when the user does not exist.
    async fn delete(&self, id: UserId) -> UserStoreResult<()>;
}

/// Errors returned by user store implementations.
#[derive(Debug, Clone, Error)]
pub enum UserStoreError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same username already exists.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
