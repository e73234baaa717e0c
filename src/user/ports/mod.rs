//! Port contracts for user accounts.
//!
//! The user policy depends on a store plus two opaque primitives: a password
//! hasher and a token issuer. Token verification is the inverse collaborator
//! used to rebuild [`Claims`](crate::access::Claims) per request.

pub mod credentials;
pub mod store;
pub mod token;

pub use credentials::{PasswordHasher, PasswordHasherError};
pub use store::{UserStore, UserStoreError, UserStoreResult};
pub use token::{TokenError, TokenIssuer, TokenSubject, TokenVerifier};
