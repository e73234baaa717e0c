//! User account aggregate.

use super::{PasswordHash, UserId, Username};
use crate::access::Role;
use crate::patch::FieldPatch;
use serde::{Deserialize, Serialize};

/// User account with hashed credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
    role: Role,
}

impl User {
    /// Creates a user with a fresh identifier.
    #[must_use]
    pub fn new(username: Username, password_hash: PasswordHash, role: Role) -> Self {
        Self::from_parts(UserId::new(), username, password_hash, role)
    }

    /// Reconstructs a user from stored parts.
    #[must_use]
    pub const fn from_parts(
        id: UserId,
        username: Username,
        password_hash: PasswordHash,
        role: Role,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            role,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Applies the set fields of `patch`, leaving the rest untouched.
    pub fn apply_patch(&mut self, patch: &UserPatch) {
        patch.username.apply_to(&mut self.username);
        patch.password_hash.apply_to(&mut self.password_hash);
        patch.role.apply_to(&mut self.role);
    }
}

/// Partial update of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    /// New login name.
    pub username: FieldPatch<Username>,
    /// New password hash.
    pub password_hash: FieldPatch<PasswordHash>,
    /// New role.
    pub role: FieldPatch<Role>,
}

impl UserPatch {
    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_unset() && self.password_hash.is_unset() && self.role.is_unset()
    }
}
