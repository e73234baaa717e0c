//! User accounts, credentials, and the role hierarchy.
//!
//! Accounts hold one of three roles (`User < Admin < Root`). Regular users may
//! only act on themselves, admins may act on regular users and on their own
//! account, and root is unrestricted. Passwords are stored only as hashes.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Authorization-aware policy and root bootstrap in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
