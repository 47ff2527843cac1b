//! In-Memory Credential Store
//!
//! Process-local store used when no database is configured and as the
//! fixture for tests. Email uniqueness is checked under the write lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::{IdentityError, IdentityResult};

#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> IdentityResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn save(&self, user: &User) -> IdentityResult<()> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|other| other.email == user.email && other.id != user.id)
        {
            return Err(IdentityError::AlreadyExists);
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> IdentityResult<bool> {
        Ok(self.users.write().await.remove(id).is_some())
    }
}
