use argon2::{
    Algorithm, Argon2, Params, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use latchkey_core::{Password, PasswordHash};
use secrecy::ExposeSecret;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password does not match")]
    Mismatch,
    #[error("Malformed password hash: {0}")]
    Malformed(String),
    #[error("Password hashing failed: {0}")]
    Unexpected(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordHashError> {
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| PasswordHashError::Unexpected(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
pub async fn compute_password_hash(password: Password) -> Result<PasswordHash, PasswordHashError> {
    let current_span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt = SaltString::generate(rand_core::OsRng);
            hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|hash| PasswordHash::new(hash.to_string()))
                .map_err(|e| PasswordHashError::Unexpected(e.to_string()))
        })
    })
    .await
    .map_err(|e| PasswordHashError::Unexpected(e.to_string()))?
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
pub async fn verify_password_hash(
    expected: PasswordHash,
    candidate: Password,
) -> Result<(), PasswordHashError> {
    let current_span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let expected = argon2::PasswordHash::new(expected.as_ref().expose_secret())
                .map_err(|e| PasswordHashError::Malformed(e.to_string()))?;

            hasher()?
                .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
                .map_err(|e| match e {
                    password_hash::Error::Password => PasswordHashError::Mismatch,
                    other => PasswordHashError::Unexpected(other.to_string()),
                })
        })
    })
    .await
    .map_err(|e| PasswordHashError::Unexpected(e.to_string()))?
}
