use latchkey_core::{Category, Claims, Clock, Token, TokenDetails};

use super::token_factory::{TokenError, TokenFactory};

/// Issues matched access/refresh pairs under a single clock.
#[derive(Clone)]
pub struct TokenDetailsFactory {
    access_tokens: TokenFactory,
    refresh_tokens: TokenFactory,
    clock: Clock,
}

impl TokenDetailsFactory {
    pub fn new(
        access_tokens: TokenFactory,
        refresh_tokens: TokenFactory,
        clock: Clock,
    ) -> Result<Self, TokenError> {
        for (factory, expected) in [
            (&access_tokens, Category::Access),
            (&refresh_tokens, Category::Refresh),
        ] {
            if factory.category() != expected {
                return Err(TokenError::CategoryMismatch {
                    expected,
                    found: factory.category(),
                });
            }
        }

        Ok(Self {
            access_tokens,
            refresh_tokens,
            clock,
        })
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Issue both tokens at the same instant. Either both succeed or the
    /// whole call fails; a half pair is never returned.
    pub fn create(&self, subject: &str) -> Result<TokenDetails, TokenError> {
        let now = (self.clock)();
        let access_token = self.access_tokens.create(now, subject)?;
        let refresh_token = self.refresh_tokens.create(now, subject)?;

        Ok(TokenDetails {
            access_token,
            refresh_token,
        })
    }

    /// Issue a fresh access token only, for an existing session.
    pub fn access_token(&self, subject: &str) -> Result<Token, TokenError> {
        self.access_tokens.create((self.clock)(), subject)
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.access_tokens.validate(token, (self.clock)())
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.refresh_tokens.validate(token, (self.clock)())
    }
}
