pub mod auth_service;
pub mod credentials;
pub mod error;
pub mod tokens;

#[cfg(test)]
mod test_support;

pub use auth_service::{AuthService, TokenUrl};
pub use credentials::{
    cred_store::{CredStore, CredStoreError},
    password_policy::{EntropyPolicy, PasswordPolicy, PasswordPolicyError},
};
pub use error::AuthError;
pub use tokens::{
    reset_token_factory::ResetTokenFactory,
    token_details_factory::TokenDetailsFactory,
    token_factory::{TokenError, TokenFactory},
};
