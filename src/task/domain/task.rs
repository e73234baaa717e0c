//! Task aggregate and related value types.

use super::{ParseTaskStatusError, TaskId, TaskTitle};
use crate::patch::FieldPatch;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task progress status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Pending,
    /// Work is underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical display and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// The user-editable content of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// Task title.
    pub title: TaskTitle,
    /// Free-form description, possibly empty.
    pub description: String,
    /// When the task is due.
    pub due_date: DateTime<Utc>,
    /// Progress status.
    pub status: TaskStatus,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    due_date: DateTime<Utc>,
    status: TaskStatus,
    owner_id: UserId,
}

impl Task {
    /// Creates a new task owned by `owner_id`.
    #[must_use]
    pub fn new(owner_id: UserId, details: TaskDetails) -> Self {
        Self::from_parts(TaskId::new(), owner_id, details)
    }

    /// Reconstructs a task from stored parts.
    #[must_use]
    pub fn from_parts(id: TaskId, owner_id: UserId, details: TaskDetails) -> Self {
        let TaskDetails {
            title,
            description,
            due_date,
            status,
        } = details;
        Self {
            id,
            title,
            description,
            due_date,
            status,
            owner_id,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the progress status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the identifier of the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Applies the set fields of `patch`, leaving the rest untouched.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        patch.title.apply_to(&mut self.title);
        patch.description.apply_to(&mut self.description);
        patch.due_date.apply_to(&mut self.due_date);
        patch.status.apply_to(&mut self.status);
    }
}

/// Partial update of a task's editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    /// New title.
    pub title: FieldPatch<TaskTitle>,
    /// New description.
    pub description: FieldPatch<String>,
    /// New due date.
    pub due_date: FieldPatch<DateTime<Utc>>,
    /// New status.
    pub status: FieldPatch<TaskStatus>,
}

impl TaskPatch {
    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_unset()
            && self.description.is_unset()
            && self.due_date.is_unset()
            && self.status.is_unset()
    }
}
