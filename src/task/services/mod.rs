//! Authorization-aware task policy.

mod policy;

pub use policy::{CreateTaskRequest, PatchTaskRequest, ReplaceTaskRequest, TaskPolicy};
