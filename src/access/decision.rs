//! Pure access evaluation.

use super::{Claims, Role};
use crate::user::domain::UserId;
use std::fmt;

/// Operation being attempted on a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Creating a new account.
    Add,
    /// Changing an existing account.
    Update,
    /// Removing an existing account.
    Delete,
}

impl Action {
    /// Returns the verb used in denial messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an access check refused the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// A `User` tried to create an account.
    UserCannotAdd,
    /// A `User` tried to act on someone else's account.
    UserCannotActOnOther(Action),
    /// An `Admin` tried to act on the root account.
    RootProtected(Action),
    /// An `Admin` tried to act on a different admin account.
    AdminCannotActOnAdmin(Action),
    /// A non-privileged actor tried to modify a task owned by someone else.
    NotTaskOwner,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserCannotAdd => f.write_str("a user cannot add a new user"),
            Self::UserCannotActOnOther(action) => {
                write!(f, "a user cannot {action} another user")
            }
            Self::RootProtected(action) => write!(f, "cannot {action} root user"),
            Self::AdminCannotActOnAdmin(action) => {
                write!(f, "admin cannot {action} another admin")
            }
            Self::NotTaskOwner => f.write_str("a user may only modify their own task"),
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessDecision {
    /// The actor may proceed.
    Allow,
    /// The actor is refused.
    Deny(DenyReason),
}

impl AccessDecision {
    /// Returns `true` when access is granted.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Converts the decision into a `Result`, keeping the denial reason.
    ///
    /// # Errors
    ///
    /// Returns the [`DenyReason`] when access is refused.
    pub const fn into_result(self) -> Result<(), DenyReason> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(reason) => Err(reason),
        }
    }
}

/// Decides whether `claims` may perform `action` on the account identified by
/// `target_id` holding `target_role`.
///
/// For [`Action::Add`] the target is the not-yet-persisted candidate account.
#[must_use]
pub fn evaluate_access(
    claims: &Claims,
    target_id: UserId,
    target_role: Role,
    action: Action,
) -> AccessDecision {
    let acting_on_self = claims.actor_id() == target_id;
    match claims.role() {
        Role::User if acting_on_self => AccessDecision::Allow,
        Role::User if action == Action::Add => AccessDecision::Deny(DenyReason::UserCannotAdd),
        Role::User => AccessDecision::Deny(DenyReason::UserCannotActOnOther(action)),
        Role::Admin if target_role == Role::Root => {
            AccessDecision::Deny(DenyReason::RootProtected(action))
        }
        Role::Admin if target_role == Role::Admin && !acting_on_self => {
            AccessDecision::Deny(DenyReason::AdminCannotActOnAdmin(action))
        }
        Role::Admin | Role::Root => AccessDecision::Allow,
    }
}

/// Decides whether `claims` may replace, patch, or delete a task owned by
/// `owner_id`.
#[must_use]
pub fn evaluate_ownership(claims: &Claims, owner_id: UserId) -> AccessDecision {
    if claims.role().is_privileged() || claims.actor_id() == owner_id {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny(DenyReason::NotTaskOwner)
    }
}
