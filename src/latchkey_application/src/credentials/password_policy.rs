use latchkey_core::Credentials;
use secrecy::ExposeSecret;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password is too simple")]
    TooSimple,
}

/// Decides whether a password is acceptable for the given account.
pub trait PasswordPolicy: Send + Sync {
    fn check(&self, credentials: &Credentials) -> Result<(), PasswordPolicyError>;
}

impl<F> PasswordPolicy for F
where
    F: Fn(&Credentials) -> Result<(), PasswordPolicyError> + Send + Sync,
{
    fn check(&self, credentials: &Credentials) -> Result<(), PasswordPolicyError> {
        self(credentials)
    }
}

/// Rejects passwords whose zxcvbn score falls below `min_score`.
///
/// The user id and email are fed to the estimator as known inputs, so a
/// password built from either scores low.
#[derive(Debug, Clone, Copy)]
pub struct EntropyPolicy {
    min_score: u8,
}

impl EntropyPolicy {
    pub const DEFAULT_MIN_SCORE: u8 = 3;

    pub fn new(min_score: u8) -> Self {
        Self { min_score }
    }
}

impl Default for EntropyPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_SCORE)
    }
}

impl PasswordPolicy for EntropyPolicy {
    fn check(&self, credentials: &Credentials) -> Result<(), PasswordPolicyError> {
        let password = credentials.password.as_ref().expose_secret();
        if password.is_empty() {
            return Err(PasswordPolicyError::TooSimple);
        }

        let mut inputs = vec![credentials.user.as_str()];
        if let Some(email) = &credentials.email {
            inputs.push(email.as_ref().expose_secret().as_str());
        }

        let entropy = zxcvbn::zxcvbn(password, &inputs);
        if (entropy.score() as u8) < self.min_score {
            return Err(PasswordPolicyError::TooSimple);
        }
        Ok(())
    }
}
