//! Taskwarden: authorization-aware policies for tasks and user accounts.
//!
//! The crate sits between a transport layer and a store. Controllers hand
//! each policy operation the request data plus the actor's [`access::Claims`],
//! and get back either a result or a [`error::PolicyError`] carrying a kind,
//! a status code hint, and a message.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Validated values and aggregates with no infrastructure
//! - **Ports**: Store, hasher, and token traits
//! - **Adapters**: In-memory stores, bcrypt hashing, and JWT tokens
//! - **Services**: The policies themselves
//!
//! # Modules
//!
//! - [`access`]: Roles, claims, and the pure authorization rules
//! - [`task`]: Task lifecycle with ownership checks
//! - [`user`]: Accounts, the role hierarchy, and authentication
//! - [`config`]: Environment-driven authentication settings

pub mod access;
pub mod config;
pub mod error;
pub mod patch;
pub mod task;
pub mod user;
