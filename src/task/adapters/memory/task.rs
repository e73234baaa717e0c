//! In-memory task store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.read()?;
        Ok(tasks.values().cloned().collect())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let tasks = self.read()?;
        Ok(tasks.get(&id).cloned())
    }

    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let mut tasks = self.write()?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn replace(&self, id: TaskId, task: &Task) -> TaskStoreResult<()> {
        let mut tasks = self.write()?;
        let stored = tasks.get_mut(&id).ok_or(TaskStoreError::NotFound(id))?;
        *stored = task.clone();
        Ok(())
    }

    async fn apply_patch(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<()> {
        let mut tasks = self.write()?;
        let stored = tasks.get_mut(&id).ok_or(TaskStoreError::NotFound(id))?;
        stored.apply_patch(patch);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut tasks = self.write()?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskStoreError::NotFound(id))
    }
}
