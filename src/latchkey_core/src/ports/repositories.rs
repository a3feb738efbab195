use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{token::Token, user_entry::UserEntry, user_id::UserId};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User not found")]
    UserNotFound,
    #[error("User already exists")]
    UserExists,
    #[error("Email already exists")]
    EmailExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserNotFound, Self::UserNotFound)
                | (Self::UserExists, Self::UserExists)
                | (Self::EmailExists, Self::EmailExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Credential persistence.
///
/// `create` must reject a duplicate user id or email atomically; two racing
/// creates for the same key never both succeed.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, user: &UserId) -> Result<UserEntry, UserStoreError>;
    async fn create(&self, entry: UserEntry) -> Result<(), UserStoreError>;
    async fn upsert(&self, entry: UserEntry) -> Result<(), UserStoreError>;
}

// TokenStore port trait and errors
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Token not found")]
    TokenNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for TokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::TokenNotFound, Self::TokenNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Ledger of live refresh sessions, keyed by the refresh token itself.
///
/// A `put` is visible to a subsequent `exists` on the same key. Putting a
/// token that is already present overwrites its record. `delete` of an
/// absent token succeeds.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn put(&self, token: &Token) -> Result<(), TokenStoreError>;
    async fn exists(&self, token: &str) -> Result<(), TokenStoreError>;
    async fn delete(&self, token: &str) -> Result<(), TokenStoreError>;
    async fn list(&self) -> Result<Vec<Token>, TokenStoreError>;
    /// Removes every record whose expiry is strictly before `now`.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<(), TokenStoreError>;
}
