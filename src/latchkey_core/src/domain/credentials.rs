use serde::Deserialize;

use super::{email::Email, password::Password, user_id::UserId};

/// Transient user-supplied credentials. Never persisted as-is.
///
/// `email` is only meaningful when credentials are being stored; login
/// requests leave it out.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub user: UserId,
    #[serde(default)]
    pub email: Option<Email>,
    pub password: Password,
}

impl Credentials {
    pub fn new(user: UserId, password: Password) -> Self {
        Self {
            user,
            email: None,
            password,
        }
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }
}

/// Payload for completing a password reset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordPayload {
    pub user: UserId,
    pub token: String,
    pub password: Password,
}
