use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// A plaintext password as supplied by a caller.
///
/// Strength is not checked here; the credential store applies its policy
/// when a password is about to be persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Password(Secret<String>);

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Self(Secret::from(password.into()))
    }
}

impl From<Secret<String>> for Password {
    fn from(secret: Secret<String>) -> Self {
        Self(secret)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
