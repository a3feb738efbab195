use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use latchkey_core::{Token, TokenStore, TokenStoreError};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct HashMapTokenStore {
    tokens: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl HashMapTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TokenStore for HashMapTokenStore {
    async fn put(&self, token: &Token) -> Result<(), TokenStoreError> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.token.clone(), token.expires);
        Ok(())
    }

    async fn exists(&self, token: &str) -> Result<(), TokenStoreError> {
        let tokens = self.tokens.read().await;
        if tokens.contains_key(token) {
            Ok(())
        } else {
            Err(TokenStoreError::TokenNotFound)
        }
    }

    async fn delete(&self, token: &str) -> Result<(), TokenStoreError> {
        self.tokens.write().await.remove(token);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Token>, TokenStoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .map(|(token, expires)| Token {
                token: token.clone(),
                expires: *expires,
            })
            .collect())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<(), TokenStoreError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, expires| *expires >= now);
        tracing::debug!(removed = before - tokens.len(), "deleted expired sessions");
        Ok(())
    }
}
