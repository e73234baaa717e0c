//! Policy layer for task lifecycle operations.
//!
//! [`TaskPolicy`] validates request data, enforces task ownership, and hands
//! persistence to a [`TaskStore`]. Operations that mutate an existing task
//! read it first; a missing task ends the operation before any write.

use crate::{
    access::{Claims, evaluate_ownership},
    error::{PolicyError, PolicyResult},
    patch::FieldPatch,
    task::{
        domain::{
            Task, TaskDetails, TaskDomainError, TaskId, TaskPatch, TaskStatus, TaskTitle,
            TaskView,
        },
        ports::{TaskStore, TaskStoreError},
    },
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    due_date: Option<DateTime<Utc>>,
    status: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the task title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date: None,
            status: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the status. A blank status falls back to `Pending`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    fn into_details(self) -> Result<TaskDetails, TaskDomainError> {
        let title = TaskTitle::new(self.title)?;
        let due_date = self.due_date.ok_or(TaskDomainError::MissingDueDate)?;
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => TaskStatus::default(),
            Some(raw) => TaskStatus::try_from(raw)?,
        };
        Ok(TaskDetails {
            title,
            description: self.description,
            due_date,
            status,
        })
    }
}

/// Request payload for fully replacing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceTaskRequest {
    title: String,
    description: String,
    due_date: Option<DateTime<Utc>>,
    status: String,
}

impl ReplaceTaskRequest {
    /// Creates a request with the replacement title, description, and status.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: None,
            status: status.into(),
        }
    }

    /// Sets the replacement due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_details(self) -> Result<TaskDetails, TaskDomainError> {
        Ok(TaskDetails {
            title: TaskTitle::new(self.title)?,
            description: self.description,
            due_date: self.due_date.ok_or(TaskDomainError::MissingDueDate)?,
            status: TaskStatus::try_from(self.status.as_str())?,
        })
    }
}

/// Request payload for partially updating a task.
///
/// Fields left as `None` are not written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchTaskRequest {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    status: Option<String>,
}

impl PatchTaskRequest {
    /// Creates an empty patch request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title. A blank title is rejected.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description. An empty string clears the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets a new status.
    ///
    /// A supplied status is always validated: a blank value is rejected
    /// rather than treated as "not provided". Leave the status unset to keep
    /// the stored one.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        Ok(TaskPatch {
            title: FieldPatch::from(self.title).try_map(TaskTitle::new)?,
            description: FieldPatch::from(self.description),
            due_date: FieldPatch::from(self.due_date),
            status: FieldPatch::from(self.status)
                .try_map(|raw| TaskStatus::try_from(raw.as_str()))?,
        })
    }
}

/// Task lifecycle policy enforcing ownership.
#[derive(Clone)]
pub struct TaskPolicy<S>
where
    S: TaskStore,
{
    store: Arc<S>,
}

impl<S> TaskPolicy<S>
where
    S: TaskStore,
{
    /// Creates a new task policy over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns all tasks.
    ///
    /// # Errors
    ///
    /// Returns a `Store` error when the store read fails.
    pub async fn list(&self) -> PolicyResult<Vec<Task>> {
        Ok(self.store.list_all().await?)
    }

    /// Returns the task with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent or `Store` when the read
    /// fails.
    pub async fn get_by_id(&self, id: TaskId) -> PolicyResult<Task> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskStoreError::NotFound(id).into())
    }

    /// Creates a task owned by the acting user.
    ///
    /// The status defaults to `Pending` when omitted.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the title or due date is missing or the
    /// status is unknown, and `Store` when persistence fails.
    pub async fn create(
        &self,
        request: CreateTaskRequest,
        claims: &Claims,
    ) -> PolicyResult<TaskView> {
        let details = request.into_details()?;
        let task = Task::new(claims.actor_id(), details);
        self.store.insert(&task).await?;
        Ok(TaskView::from(&task))
    }

    /// Overwrites the editable fields of a task.
    ///
    /// The task keeps its original owner.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent, `Forbidden` when the actor
    /// neither owns the task nor holds a privileged role, `Validation` for
    /// invalid replacement data, and `Store` on persistence failure.
    pub async fn replace(
        &self,
        id: TaskId,
        request: ReplaceTaskRequest,
        claims: &Claims,
    ) -> PolicyResult<TaskView> {
        let existing = self.find_authorized(id, claims).await?;
        let details = request.into_details()?;
        let replacement = Task::from_parts(id, existing.owner_id(), details);
        self.store.replace(id, &replacement).await?;
        self.refreshed_view(id).await
    }

    /// Writes only the fields supplied in `request`.
    ///
    /// An empty request leaves the stored task unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent, `Forbidden` when the actor
    /// neither owns the task nor holds a privileged role, `Validation` when a
    /// supplied title is blank or status is unknown, and `Store` on
    /// persistence failure.
    pub async fn patch(
        &self,
        id: TaskId,
        request: PatchTaskRequest,
        claims: &Claims,
    ) -> PolicyResult<TaskView> {
        let existing = self.find_authorized(id, claims).await?;
        let patch = request.into_patch()?;
        if patch.is_empty() {
            return Ok(TaskView::from(&existing));
        }
        self.store.apply_patch(id, &patch).await?;
        self.refreshed_view(id).await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is absent, `Forbidden` when the actor
    /// neither owns the task nor holds a privileged role, and `Store` on
    /// persistence failure.
    pub async fn delete(&self, id: TaskId, claims: &Claims) -> PolicyResult<()> {
        self.find_authorized(id, claims).await?;
        Ok(self.store.delete(id).await?)
    }

    async fn find_authorized(&self, id: TaskId, claims: &Claims) -> PolicyResult<Task> {
        let task = self.get_by_id(id).await?;
        evaluate_ownership(claims, task.owner_id()).into_result()?;
        Ok(task)
    }

    async fn refreshed_view(&self, id: TaskId) -> PolicyResult<TaskView> {
        let task = self.get_by_id(id).await?;
        Ok(TaskView::from(&task))
    }
}

impl From<TaskDomainError> for PolicyError {
    fn from(err: TaskDomainError) -> Self {
        Self::validation(err.to_string()).with_source(err)
    }
}

impl From<TaskStoreError> for PolicyError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(_) => Self::not_found("task not found").with_source(err),
            TaskStoreError::DuplicateTask(_) => Self::conflict(err.to_string()).with_source(err),
            TaskStoreError::Persistence(_) => Self::store(err),
        }
    }
}
