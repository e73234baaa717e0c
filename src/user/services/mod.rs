//! Services for user accounts.

mod bootstrap;
mod policy;

pub use bootstrap::{RootBootstrap, RootCredentials, bootstrap_root_user};
pub use policy::{AddUserRequest, CredentialsRequest, UpdateUserRequest, UserPolicy};
