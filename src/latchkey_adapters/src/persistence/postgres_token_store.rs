use chrono::{DateTime, Utc};
use latchkey_core::{Token, TokenStore, TokenStoreError};
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PostgresTokenStore {
    pool: PgPool,
}

impl PostgresTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unexpected(e: sqlx::Error) -> TokenStoreError {
    TokenStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl TokenStore for PostgresTokenStore {
    #[tracing::instrument(name = "Storing session in PostgreSQL", skip_all)]
    async fn put(&self, token: &Token) -> Result<(), TokenStoreError> {
        sqlx::query(
            r#"
                INSERT INTO tokens (token, expires)
                VALUES ($1, $2)
                ON CONFLICT (token) DO UPDATE SET expires = EXCLUDED.expires
            "#,
        )
        .bind(&token.token)
        .bind(token.expires)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Checking session in PostgreSQL", skip_all)]
    async fn exists(&self, token: &str) -> Result<(), TokenStoreError> {
        let row = sqlx::query("SELECT 1 FROM tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(|_| ()).ok_or(TokenStoreError::TokenNotFound)
    }

    #[tracing::instrument(name = "Deleting session from PostgreSQL", skip_all)]
    async fn delete(&self, token: &str) -> Result<(), TokenStoreError> {
        sqlx::query("DELETE FROM tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Listing sessions in PostgreSQL", skip_all)]
    async fn list(&self) -> Result<Vec<Token>, TokenStoreError> {
        let rows = sqlx::query("SELECT token, expires FROM tokens")
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        rows.iter()
            .map(|row| -> Result<Token, TokenStoreError> {
                Ok(Token {
                    token: row.try_get("token").map_err(unexpected)?,
                    expires: row.try_get("expires").map_err(unexpected)?,
                })
            })
            .collect()
    }

    #[tracing::instrument(name = "Deleting expired sessions from PostgreSQL", skip_all)]
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<(), TokenStoreError> {
        let result = sqlx::query("DELETE FROM tokens WHERE expires < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        tracing::debug!(removed = result.rows_affected(), "deleted expired sessions");
        Ok(())
    }
}
