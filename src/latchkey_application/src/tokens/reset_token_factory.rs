use chrono::{DateTime, TimeDelta, Utc};
use latchkey_core::{Category, Claims, Token, UserId};

use super::token_factory::{TokenError, TokenFactory};

/// Mints and checks "password-reset" tokens.
///
/// Uses its own key pair, independent of the session keys, so a leak of one
/// cannot be used to forge the other.
#[derive(Clone)]
pub struct ResetTokenFactory(TokenFactory);

impl ResetTokenFactory {
    pub fn new(factory: TokenFactory) -> Result<Self, TokenError> {
        if factory.category() != Category::PasswordReset {
            return Err(TokenError::CategoryMismatch {
                expected: Category::PasswordReset,
                found: factory.category(),
            });
        }
        Ok(Self(factory))
    }

    pub fn from_ec_pem(
        issuer: impl Into<String>,
        validity: TimeDelta,
        private_key_pem: &[u8],
        public_key_pem: &[u8],
    ) -> Result<Self, TokenError> {
        TokenFactory::from_ec_pem(
            issuer,
            Category::PasswordReset,
            validity,
            private_key_pem,
            public_key_pem,
        )
        .map(Self)
    }

    pub fn create(&self, now: DateTime<Utc>, user: &UserId) -> Result<Token, TokenError> {
        self.0.create(now, user.as_str())
    }

    /// Validate `token` and require that it was minted for `user`.
    pub fn validate(
        &self,
        token: &str,
        now: DateTime<Utc>,
        user: &UserId,
    ) -> Result<Claims, TokenError> {
        let claims = self.0.validate(token, now)?;
        if claims.subject != user.as_str() {
            tracing::debug!("reset token rejected: subject mismatch");
            return Err(TokenError::InvalidToken);
        }
        Ok(claims)
    }
}
