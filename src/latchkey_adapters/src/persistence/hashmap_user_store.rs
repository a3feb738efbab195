use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use latchkey_core::{UserEntry, UserId, UserStore, UserStoreError};

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, UserEntry>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn get(&self, user: &UserId) -> Result<UserEntry, UserStoreError> {
        let users = self.users.read().await;
        users.get(user).cloned().ok_or(UserStoreError::UserNotFound)
    }

    async fn create(&self, entry: UserEntry) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&entry.user) {
            return Err(UserStoreError::UserExists);
        }
        if users.values().any(|existing| existing.email == entry.email) {
            return Err(UserStoreError::EmailExists);
        }
        users.insert(entry.user.clone(), entry);
        Ok(())
    }

    async fn upsert(&self, mut entry: UserEntry) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|existing| existing.user != entry.user && existing.email == entry.email)
        {
            return Err(UserStoreError::EmailExists);
        }
        if let Some(existing) = users.get(&entry.user) {
            entry.created = existing.created;
        }
        users.insert(entry.user.clone(), entry);
        Ok(())
    }
}
