//! Sanitized task projection for transport boundaries.

use super::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Task as returned to controllers: string identifier, no owner field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// String-formatted task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Progress status.
    pub status: TaskStatus,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            due_date: task.due_date(),
            status: task.status(),
        }
    }
}
