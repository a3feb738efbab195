use std::sync::Arc;

use chrono::{DateTime, Utc};
use latchkey_core::{Clock, Token, TokenStore, TokenStoreError};
use redis::{Commands, Connection};
use tokio::sync::RwLock;

/// Session ledger in Redis.
///
/// Each session is a key holding its expiry timestamp, with a Redis TTL set
/// to the session's remaining lifetime. Redis evicts expired sessions on its
/// own, so `delete_expired` has nothing to do.
#[derive(Clone)]
pub struct RedisTokenStore {
    conn: Arc<RwLock<Connection>>,
    clock: Clock,
}

impl RedisTokenStore {
    pub fn new(conn: Arc<RwLock<Connection>>, clock: Clock) -> Self {
        Self { conn, clock }
    }
}

fn unexpected(e: redis::RedisError) -> TokenStoreError {
    TokenStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl TokenStore for RedisTokenStore {
    #[tracing::instrument(name = "Storing session in Redis", skip_all)]
    async fn put(&self, token: &Token) -> Result<(), TokenStoreError> {
        let Some(ttl) = time_to_live(token.expires, (self.clock)()) else {
            tracing::debug!("session already expired; not stored");
            return Ok(());
        };

        let mut conn = self.conn.write().await;
        conn.set_ex::<_, _, ()>(get_key(&token.token), token.expires.timestamp(), ttl)
            .map_err(unexpected)
    }

    #[tracing::instrument(name = "Checking session in Redis", skip_all)]
    async fn exists(&self, token: &str) -> Result<(), TokenStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        if conn.exists::<_, bool>(&key).map_err(unexpected)? {
            Ok(())
        } else {
            Err(TokenStoreError::TokenNotFound)
        }
    }

    #[tracing::instrument(name = "Deleting session from Redis", skip_all)]
    async fn delete(&self, token: &str) -> Result<(), TokenStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        conn.del::<_, ()>(&key).map_err(unexpected)
    }

    #[tracing::instrument(name = "Listing sessions in Redis", skip_all)]
    async fn list(&self) -> Result<Vec<Token>, TokenStoreError> {
        let mut conn = self.conn.write().await;
        let keys: Vec<String> = conn
            .keys(format!("{SESSION_KEY_PREFIX}*"))
            .map_err(unexpected)?;

        let mut tokens = Vec::with_capacity(keys.len());
        for key in keys {
            // The key may have expired between KEYS and GET.
            let Some(expires) = conn.get::<_, Option<i64>>(&key).map_err(unexpected)? else {
                continue;
            };
            let Some(expires) = DateTime::from_timestamp(expires, 0) else {
                return Err(TokenStoreError::UnexpectedError(format!(
                    "session expiry out of range: {expires}"
                )));
            };
            tokens.push(Token {
                token: key[SESSION_KEY_PREFIX.len()..].to_owned(),
                expires,
            });
        }
        Ok(tokens)
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<(), TokenStoreError> {
        Ok(())
    }
}

const SESSION_KEY_PREFIX: &str = "session:";

fn get_key(token: &str) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, token)
}

/// Whole seconds until `expires`, rounded up. `None` once it has passed.
fn time_to_live(expires: DateTime<Utc>, now: DateTime<Utc>) -> Option<u64> {
    let remaining_ms = (expires - now).num_milliseconds();
    if remaining_ms <= 0 {
        return None;
    }
    u64::try_from(remaining_ms).ok().map(|ms| ms.div_ceil(1000))
}
