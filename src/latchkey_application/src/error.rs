use color_eyre::eyre::Report;
use thiserror::Error;

use crate::credentials::cred_store::CredStoreError;

/// Everything an [`AuthService`](crate::AuthService) operation can report.
///
/// All variants except `Unexpected` are stable sentinels meant to be
/// dispatched on. `Unexpected` keeps its diagnostic chain for logs while its
/// Display stays generic.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    Credentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid password reset token")]
    InvalidResetToken,
    #[error("User already exists")]
    UserExists,
    #[error("Email already exists")]
    EmailExists,
    #[error("Invalid user id")]
    InvalidUserId,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password is too simple")]
    PasswordTooSimple,
    #[error("Unexpected error")]
    Unexpected(#[from] Report),
}

impl From<CredStoreError> for AuthError {
    fn from(error: CredStoreError) -> Self {
        match error {
            CredStoreError::Credentials => Self::Credentials,
            CredStoreError::UserExists => Self::UserExists,
            CredStoreError::EmailExists => Self::EmailExists,
            CredStoreError::InvalidEmail => Self::InvalidEmail,
            CredStoreError::PasswordTooSimple => Self::PasswordTooSimple,
            other => Self::Unexpected(Report::new(other)),
        }
    }
}
