//! Issuing and verifying signed tokens for a single category.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Header, Validation, decode};
use latchkey_core::{Category, Claims, Token};
use p256::{
    ecdsa::{Signature, SigningKey, signature::RandomizedSigner},
    pkcs8::DecodePrivateKey,
};
use rand_core::OsRng;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::ES256;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, expired, wrong issuer, wrong category or malformed.
    /// Deliberately carries no detail.
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),
    #[error("Failed to sign token: {0}")]
    Signing(String),
    #[error("Expected a {expected} token factory, got {found}")]
    CategoryMismatch { expected: Category, found: Category },
}

/// Stateless issuer/verifier for exactly one token category.
///
/// Holds its own ES256 key pair, validity window and issuer string. The
/// claims are a pure function of `(now, subject)`; the signature is not, so
/// two tokens issued in the same second still differ.
#[derive(Clone)]
pub struct TokenFactory {
    issuer: String,
    category: Category,
    validity: TimeDelta,
    signing_key: SigningKey,
    verifying_key: DecodingKey,
    validation: Validation,
}

impl TokenFactory {
    /// Build a factory from PEM-encoded keys: a PKCS#8 EC private key and
    /// its SubjectPublicKeyInfo public key, both on P-256.
    pub fn from_ec_pem(
        issuer: impl Into<String>,
        category: Category,
        validity: TimeDelta,
        private_key_pem: &[u8],
        public_key_pem: &[u8],
    ) -> Result<Self, TokenError> {
        let signing_key = std::str::from_utf8(private_key_pem)
            .map_err(|e| TokenError::InvalidKey(format!("private key: {e}")))
            .and_then(|pem| {
                SigningKey::from_pkcs8_pem(pem)
                    .map_err(|e| TokenError::InvalidKey(format!("private key: {e}")))
            })?;
        let verifying_key = DecodingKey::from_ec_pem(public_key_pem)
            .map_err(|e| TokenError::InvalidKey(format!("public key: {e}")))?;

        let issuer = issuer.into();

        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[&issuer]);
        validation.set_audience(&[category.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);
        // Expiry is checked against the injected clock, not the system time.
        validation.validate_exp = false;

        Ok(Self {
            issuer,
            category,
            validity,
            signing_key,
            verifying_key,
            validation,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn validity(&self) -> TimeDelta {
        self.validity
    }

    /// Sign a new token for `subject`, issued at `now`.
    ///
    /// Timestamps are truncated to whole seconds, so `expires` is exactly
    /// `issued_at + validity` as encoded in the claims.
    pub fn create(&self, now: DateTime<Utc>, subject: &str) -> Result<Token, TokenError> {
        let issued_at = now.timestamp();
        let expires = DateTime::from_timestamp(issued_at, 0)
            .and_then(|issued| issued.checked_add_signed(self.validity))
            .ok_or_else(|| TokenError::Signing("token expiry out of range".to_owned()))?;

        let claims = Claims {
            issuer: self.issuer.clone(),
            subject: subject.to_owned(),
            category: self.category,
            issued_at,
            expires_at: expires.timestamp(),
        };

        let token = self.sign(&claims)?;

        Ok(Token { token, expires })
    }

    /// Compact JWS over `claims`, signed with a fresh random nonce.
    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = serde_json::to_vec(&Header::new(ALGORITHM))
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        let payload = serde_json::to_vec(claims).map_err(|e| TokenError::Signing(e.to_string()))?;

        let message = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature: Signature = self
            .signing_key
            .try_sign_with_rng(&mut OsRng, message.as_bytes())
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(format!(
            "{message}.{}",
            URL_SAFE_NO_PAD.encode(signature.to_bytes())
        ))
    }

    /// Verify `token` and return its claims.
    ///
    /// Every failure collapses into [`TokenError::InvalidToken`]. The reason
    /// is only logged.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.verifying_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(category = %self.category, error = %e, "token rejected");
                TokenError::InvalidToken
            })?;

        if claims.issuer != self.issuer || claims.category != self.category {
            tracing::debug!(category = %self.category, "token rejected: claim mismatch");
            return Err(TokenError::InvalidToken);
        }

        match claims.expires() {
            Some(expires) if expires > now => Ok(claims),
            _ => {
                tracing::debug!(category = %self.category, "token rejected: expired");
                Err(TokenError::InvalidToken)
            }
        }
    }
}
