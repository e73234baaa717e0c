//! Out-of-band creation of the root account.

use crate::{
    access::Role,
    error::{PolicyError, PolicyResult},
    user::{
        domain::{Password, User, Username},
        ports::{PasswordHasher, UserStore},
    },
};
use tracing::info;

/// Credentials for the deployment's root account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootCredentials {
    username: Username,
    password: Password,
}

impl RootCredentials {
    /// Creates root credentials.
    #[must_use]
    pub const fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }

    /// Returns the root username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the root password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }
}

/// Outcome of [`bootstrap_root_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootBootstrap {
    /// The root account was created by this call.
    Created(User),
    /// An account already holds the root username and was left untouched.
    AlreadyPresent(User),
}

impl RootBootstrap {
    /// Returns the root account.
    #[must_use]
    pub const fn user(&self) -> &User {
        match self {
            Self::Created(user) | Self::AlreadyPresent(user) => user,
        }
    }
}

/// Ensures the root account exists.
///
/// No role check runs here; this is the only path that creates a root
/// account.
///
/// # Errors
///
/// Returns `Internal` when hashing fails and `Store` or `Conflict` when the
/// store rejects the insert.
pub async fn bootstrap_root_user<S, H>(
    store: &S,
    hasher: &H,
    credentials: &RootCredentials,
) -> PolicyResult<RootBootstrap>
where
    S: UserStore + ?Sized,
    H: PasswordHasher + ?Sized,
{
    if let Some(existing) = store.find_by_username(credentials.username()).await? {
        info!(user_id = %existing.id(), "root user already present");
        return Ok(RootBootstrap::AlreadyPresent(existing));
    }

    let password_hash = hasher
        .hash(credentials.password().expose())
        .map_err(PolicyError::internal)?;
    let root = User::new(credentials.username().clone(), password_hash, Role::Root);
    store.insert(&root).await?;
    info!(user_id = %root.id(), username = %root.username(), "root user created");
    Ok(RootBootstrap::Created(root))
}
