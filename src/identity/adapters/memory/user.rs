//! In-memory repository for users.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{User, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    username_index: HashMap<Username, UserId>,
    insertion_order: Vec<UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.username_index.contains_key(user.username()) {
            return Err(UserRepositoryError::DuplicateUsername(user.username().clone()));
        }

        state.username_index.insert(user.username().clone(), user.id());
        state.insertion_order.push(user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let old_username = state
            .users
            .get(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?
            .username()
            .clone();

        if *user.username() != old_username {
            if state.username_index.contains_key(user.username()) {
                return Err(UserRepositoryError::DuplicateUsername(user.username().clone()));
            }
            state.username_index.remove(&old_username);
            state.username_index.insert(user.username().clone(), user.id());
        }

        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .users
            .remove(&id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        state.username_index.remove(removed.username());
        state.insertion_order.retain(|existing| *existing != id);
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .insertion_order
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}
