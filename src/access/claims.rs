//! Authenticated actor context.

use super::Role;
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};

/// Verified identity and role of the actor performing an operation.
///
/// Claims are rebuilt per request from a verified token and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claims {
    actor_id: UserId,
    role: Role,
}

impl Claims {
    /// Creates claims for an actor.
    #[must_use]
    pub const fn new(actor_id: UserId, role: Role) -> Self {
        Self { actor_id, role }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn actor_id(&self) -> UserId {
        self.actor_id
    }

    /// Returns the acting user's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}
