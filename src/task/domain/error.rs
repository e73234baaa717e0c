//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The due date was not supplied.
    #[error("task due date is required")]
    MissingDueDate,

    /// The status is not one of the allowed values.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task status '{0}', expected one of: Pending, In Progress, Completed")]
pub struct ParseTaskStatusError(pub String);
