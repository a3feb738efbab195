use std::time::Duration;

use chrono::TimeDelta;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState};
use latchkey_application::{ResetTokenFactory, TokenError, TokenFactory};
use latchkey_core::Category;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer};

use super::constants::{
    CONFIG_FILE, ENV_PREFIX, ENV_SEPARATOR, default_time_to_live, defaults, prod,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    pub auth: AuthSetting,
    pub postgres: PostgresSetting,
    pub redis: RedisSetting,
    pub email_client: EmailClientSetting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSetting {
    pub issuer: String,
    /// Host that serves the password page linked from notifications.
    pub hostname: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
    pub sweep_interval_in_seconds: u64,
    #[serde(default)]
    pub session_store: SessionStoreKind,
    pub access: TokenSetting,
    pub refresh: TokenSetting,
    pub reset: TokenSetting,
    pub auth_code: TokenSetting,
}

impl AuthSetting {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_in_seconds)
    }

    pub fn reset_token_factory(&self) -> Result<ResetTokenFactory, TokenError> {
        ResetTokenFactory::new(self.reset.factory(&self.issuer, Category::PasswordReset)?)
    }
}

/// Backend holding refresh sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStoreKind {
    #[default]
    Postgres,
    Redis,
}

/// Key pair and validity window for one token category.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSetting {
    /// PKCS#8 PEM, P-256.
    pub private_key: Secret<String>,
    pub public_key: Secret<String>,
    /// Seconds. Falls back to the category's default.
    pub time_to_live: Option<i64>,
}

impl TokenSetting {
    pub fn time_to_live(&self, category: Category) -> TimeDelta {
        TimeDelta::seconds(
            self.time_to_live
                .unwrap_or_else(|| default_time_to_live(category)),
        )
    }

    pub fn factory(&self, issuer: &str, category: Category) -> Result<TokenFactory, TokenError> {
        TokenFactory::from_ec_pem(
            issuer,
            category,
            self.time_to_live(category),
            self.private_key.expose_secret().as_bytes(),
            self.public_key.expose_secret().as_bytes(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSetting {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSetting {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSetting {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSetting {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

/// Origins allowed to make cross-origin requests.
///
/// Deserializes from a list or from a single comma-separated string, so it
/// can be set from one environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(origins.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for AllowedOrigins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Joined(String),
            List(Vec<String>),
        }

        let origins = match Raw::deserialize(deserializer)? {
            Raw::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect(),
            Raw::List(list) => list,
        };
        Ok(Self(origins))
    }
}

impl AuthServiceSetting {
    /// Load `.env`, then the optional config file, then `LATCHKEY__*`
    /// environment variables, later sources winning.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::builder()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?
            .try_deserialize()
    }

    /// Parse settings from a JSON document on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default(
                "auth.sweep_interval_in_seconds",
                defaults::SWEEP_INTERVAL_SECONDS,
            )?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT_IN_MILLIS,
            )
    }
}
