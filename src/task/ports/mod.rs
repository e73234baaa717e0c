//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by the task policy.

pub mod store;

pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
