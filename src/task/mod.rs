//! Task management for Taskwarden.
//!
//! Tasks are owned by the user who created them. Only the owner or a
//! privileged actor (admin or root) may replace, patch, or delete a task. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Authorization-aware policy in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
