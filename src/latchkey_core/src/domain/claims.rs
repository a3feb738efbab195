use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The operation family a token may be used for.
///
/// Every validator is parameterised by the category it expects, so a token
/// minted for one family is useless for another even under a shared key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Access,
    Refresh,
    PasswordReset,
    AuthCode,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Access,
        Category::Refresh,
        Category::PasswordReset,
        Category::AuthCode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Access => "access",
            Category::Refresh => "refresh",
            Category::PasswordReset => "password-reset",
            Category::AuthCode => "auth-code",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown token category: {0}")]
pub struct CategoryError(pub String);

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}

/// The signed claim set carried by every token.
///
/// Serialised with the registered JWT names; the category travels in `aud`.
/// Timestamps are whole seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "iss")]
    pub issuer: String,
    #[serde(rename = "sub")]
    pub subject: String,
    #[serde(rename = "aud")]
    pub category: Category,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }

    pub fn issued(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.issued_at, 0)
    }
}
