//! Domain model for task management.
//!
//! Task values validate their own invariants (non-empty title, known status)
//! and keep storage and authorization concerns outside the domain boundary.

mod error;
mod ids;
mod task;
mod view;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use task::{Task, TaskDetails, TaskPatch, TaskStatus};
pub use view::TaskView;
