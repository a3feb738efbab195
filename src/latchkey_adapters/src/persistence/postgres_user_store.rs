use chrono::{DateTime, Utc};
use latchkey_core::{Email, PasswordHash, UserEntry, UserId, UserStore, UserStoreError};
use secrecy::ExposeSecret;
use sqlx::{PgPool, Row, postgres::PgRow};

const USERS_PKEY: &str = "users_pkey";
const USERS_EMAIL_KEY: &str = "users_email_key";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }
}

/// Map a unique violation to the column it concerns.
fn map_write_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(USERS_PKEY) => return UserStoreError::UserExists,
                Some(USERS_EMAIL_KEY) => return UserStoreError::EmailExists,
                _ => {}
            }
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}

fn entry_from_row(row: &PgRow) -> Result<UserEntry, UserStoreError> {
    let unexpected = |e: sqlx::Error| UserStoreError::UnexpectedError(e.to_string());

    let user: String = row.try_get("user_id").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let password_hash: Option<String> = row.try_get("password_hash").map_err(unexpected)?;
    let created: DateTime<Utc> = row.try_get("created").map_err(unexpected)?;

    Ok(UserEntry {
        user: UserId::try_from(user).map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
        email: Email::parse(&email).map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?,
        password_hash: password_hash.map(PasswordHash::new),
        created,
    })
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get(&self, user: &UserId) -> Result<UserEntry, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT user_id, email, password_hash, created
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(user.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        entry_from_row(&row)
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create(&self, entry: UserEntry) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
                INSERT INTO users (user_id, email, password_hash, created)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.user.as_str())
        .bind(entry.email.as_ref().expose_secret())
        .bind(entry.password_hash.as_ref().map(|h| h.as_ref().expose_secret()))
        .bind(entry.created)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Upserting user in PostgreSQL", skip_all)]
    async fn upsert(&self, entry: UserEntry) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
                INSERT INTO users (user_id, email, password_hash, created)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id) DO UPDATE
                SET email = EXCLUDED.email, password_hash = EXCLUDED.password_hash
            "#,
        )
        .bind(entry.user.as_str())
        .bind(entry.email.as_ref().expose_secret())
        .bind(entry.password_hash.as_ref().map(|h| h.as_ref().expose_secret()))
        .bind(entry.created)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }
}
