//! Domain model for user accounts.

mod error;
mod ids;
mod secret;
mod user;

pub use error::UserDomainError;
pub use ids::{UserId, Username};
pub use secret::{Password, PasswordHash};
pub use user::{User, UserPatch};
