use chrono::{DateTime, Utc};
use serde::Serialize;

/// An encoded, signed token together with its expiry.
///
/// `expires` mirrors the `exp` claim so stores can do expiry bookkeeping
/// without decoding the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub token: String,
    pub expires: DateTime<Utc>,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn into_string(self) -> String {
        self.token
    }
}

/// A matched access/refresh pair issued under one clock reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetails {
    pub access_token: Token,
    pub refresh_token: Token,
}
