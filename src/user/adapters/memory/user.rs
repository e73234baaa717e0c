//! In-memory user store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::user::{
    domain::{User, UserId, UserPatch, Username},
    ports::{UserStore, UserStoreError, UserStoreResult},
};

/// Thread-safe in-memory user store with a username index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    username_index: HashMap<Username, UserId>,
}

impl InMemoryUserStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> UserStoreResult<RwLockReadGuard<'_, InMemoryUserState>> {
        self.state
            .read()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> UserStoreResult<RwLockWriteGuard<'_, InMemoryUserState>> {
        self.state
            .write()
            .map_err(|err| UserStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &User) -> UserStoreResult<()> {
        let mut state = self.write()?;
        if state.users.contains_key(&user.id()) {
            return Err(UserStoreError::DuplicateUser(user.id()));
        }
        if state.username_index.contains_key(user.username()) {
            return Err(UserStoreError::DuplicateUsername(user.username().clone()));
        }

        state
            .username_index
            .insert(user.username().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn list_all(&self) -> UserStoreResult<Vec<User>> {
        let state = self.read()?;
        Ok(state.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> UserStoreResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> UserStoreResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn apply_patch(&self, id: UserId, patch: &UserPatch) -> UserStoreResult<()> {
        let mut state = self.write()?;
        let InMemoryUserState {
            users,
            username_index,
        } = &mut *state;
        let user = users.get_mut(&id).ok_or(UserStoreError::NotFound(id))?;

        if let Some(new_name) = patch.username.as_set() {
            if username_index
                .get(new_name)
                .is_some_and(|holder| *holder != id)
            {
                return Err(UserStoreError::DuplicateUsername(new_name.clone()));
            }
            username_index.remove(user.username());
            username_index.insert(new_name.clone(), id);
        }

        user.apply_patch(patch);
        Ok(())
    }

    async fn delete(&self, id: UserId) -> UserStoreResult<()> {
        let mut state = self.write()?;
        let removed = state.users.remove(&id).ok_or(UserStoreError::NotFound(id))?;
        state.username_index.remove(removed.username());
        Ok(())
    }
}
