use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};

use super::{email::Email, user_id::UserId};

/// A PHC-formatted password hash.
#[derive(Debug, Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn new(phc: impl Into<String>) -> Self {
        Self(Secret::from(phc.into()))
    }
}

impl AsRef<Secret<String>> for PasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for PasswordHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

/// Persisted credential record.
///
/// `password_hash` is `None` for an account that was registered but whose
/// owner has not yet set a password; such an account cannot log in.
#[derive(Debug, Clone, PartialEq)]
pub struct UserEntry {
    pub user: UserId,
    pub email: Email,
    pub password_hash: Option<PasswordHash>,
    pub created: DateTime<Utc>,
}

impl UserEntry {
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}
