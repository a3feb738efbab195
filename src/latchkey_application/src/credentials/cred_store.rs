use std::sync::Arc;

use color_eyre::eyre::{Report, eyre};
use latchkey_core::{
    Clock, Credentials, Email, Password, UserEntry, UserId, UserStore, UserStoreError,
};
use thiserror::Error;

use super::{
    password_hash::{PasswordHashError, compute_password_hash, verify_password_hash},
    password_policy::{EntropyPolicy, PasswordPolicy, PasswordPolicyError},
};

#[derive(Debug, Error)]
pub enum CredStoreError {
    #[error("Invalid username or password")]
    Credentials,
    #[error("User not found")]
    UserNotFound,
    #[error("User already exists")]
    UserExists,
    #[error("Email already exists")]
    EmailExists,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password is too simple")]
    PasswordTooSimple,
    #[error("Credential store failure")]
    Unexpected(#[source] Report),
}

impl From<UserStoreError> for CredStoreError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => Self::UserNotFound,
            UserStoreError::UserExists => Self::UserExists,
            UserStoreError::EmailExists => Self::EmailExists,
            UserStoreError::UnexpectedError(e) => Self::Unexpected(eyre!(e)),
        }
    }
}

impl From<PasswordPolicyError> for CredStoreError {
    fn from(error: PasswordPolicyError) -> Self {
        match error {
            PasswordPolicyError::TooSimple => Self::PasswordTooSimple,
        }
    }
}

impl From<PasswordHashError> for CredStoreError {
    fn from(error: PasswordHashError) -> Self {
        Self::Unexpected(Report::new(error))
    }
}

/// Credential persistence with password hashing and strength policy on top
/// of a [`UserStore`].
#[derive(Clone)]
pub struct CredStore<U> {
    users: U,
    policy: Arc<dyn PasswordPolicy>,
    clock: Clock,
}

impl<U: UserStore> CredStore<U> {
    pub fn new(users: U, clock: Clock) -> Self {
        Self {
            users,
            policy: Arc::new(EntropyPolicy::default()),
            clock,
        }
    }

    pub fn with_password_policy(mut self, policy: impl PasswordPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    /// Check `credentials` against the stored hash.
    ///
    /// Unknown users, accounts without a password and wrong passwords all
    /// yield [`CredStoreError::Credentials`].
    #[tracing::instrument(name = "CredStore::validate", skip_all, fields(user = %credentials.user))]
    pub async fn validate(&self, credentials: &Credentials) -> Result<(), CredStoreError> {
        let entry = match self.users.get(&credentials.user).await {
            Ok(entry) => entry,
            Err(UserStoreError::UserNotFound) => {
                // Burn one hash so the response time does not reveal the miss.
                compute_password_hash(credentials.password.clone()).await?;
                return Err(CredStoreError::Credentials);
            }
            Err(e) => return Err(e.into()),
        };

        let Some(expected) = entry.password_hash else {
            return Err(CredStoreError::Credentials);
        };

        match verify_password_hash(expected, credentials.password.clone()).await {
            Ok(()) => Ok(()),
            Err(PasswordHashError::Mismatch) => Err(CredStoreError::Credentials),
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(name = "CredStore::get", skip_all, fields(user = %user))]
    pub async fn get(&self, user: &UserId) -> Result<UserEntry, CredStoreError> {
        Ok(self.users.get(user).await?)
    }

    /// Store new credentials. Fails if the user id or email is taken.
    #[tracing::instrument(name = "CredStore::create", skip_all, fields(user = %credentials.user))]
    pub async fn create(&self, credentials: Credentials) -> Result<(), CredStoreError> {
        let entry = self.hashed_entry(credentials).await?;
        Ok(self.users.create(entry).await?)
    }

    /// Store credentials, replacing the hash of an existing account.
    #[tracing::instrument(name = "CredStore::upsert", skip_all, fields(user = %credentials.user))]
    pub async fn upsert(&self, credentials: Credentials) -> Result<(), CredStoreError> {
        let entry = self.hashed_entry(credentials).await?;
        Ok(self.users.upsert(entry).await?)
    }

    /// Create an account with no usable password.
    #[tracing::instrument(name = "CredStore::create_pending", skip_all, fields(user = %user))]
    pub async fn create_pending(&self, user: UserId, email: Email) -> Result<(), CredStoreError> {
        let entry = UserEntry {
            user,
            email,
            password_hash: None,
            created: (self.clock)(),
        };
        Ok(self.users.create(entry).await?)
    }

    /// Replace the password of an existing account, keeping its email.
    #[tracing::instrument(name = "CredStore::update_password", skip_all, fields(user = %user))]
    pub async fn update_password(
        &self,
        user: &UserId,
        password: Password,
    ) -> Result<(), CredStoreError> {
        let existing = self.users.get(user).await?;
        let credentials = Credentials::new(existing.user, password).with_email(existing.email);
        self.upsert(credentials).await
    }

    async fn hashed_entry(&self, credentials: Credentials) -> Result<UserEntry, CredStoreError> {
        let email = credentials
            .email
            .clone()
            .ok_or(CredStoreError::InvalidEmail)?;

        self.policy.check(&credentials)?;
        let password_hash = compute_password_hash(credentials.password).await?;

        Ok(UserEntry {
            user: credentials.user,
            email,
            password_hash: Some(password_hash),
            created: (self.clock)(),
        })
    }
}
