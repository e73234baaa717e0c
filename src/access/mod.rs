//! Authorization vocabulary shared by the task and user policies.
//!
//! The access rules are pure functions over [`Claims`] and a target identity,
//! so they can be exercised without any store:
//!
//! - [`evaluate_access`] enforces the `User < Admin < Root` hierarchy for
//!   operations on user accounts.
//! - [`evaluate_ownership`] enforces owner-or-privileged access to tasks.

mod claims;
mod decision;
mod role;

pub use claims::Claims;
pub use decision::{AccessDecision, Action, DenyReason, evaluate_access, evaluate_ownership};
pub use role::{ParseRoleError, Role};
