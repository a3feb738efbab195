use latchkey_core::Category;

/// Prefix of environment variables that override configuration,
/// e.g. `LATCHKEY__AUTH__ISSUER`.
pub const ENV_PREFIX: &str = "LATCHKEY";
pub const ENV_SEPARATOR: &str = "__";
/// Optional configuration file, any format the `config` crate detects.
pub const CONFIG_FILE: &str = "config/base";

pub mod defaults {
    pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 15 * 60;
    pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
    pub const RESET_TOKEN_TTL_SECONDS: i64 = 60 * 60;
    pub const AUTH_CODE_TTL_SECONDS: i64 = 60;
    pub const SWEEP_INTERVAL_SECONDS: u64 = 5 * 60;
}

/// Validity window used when a token block does not set one.
pub fn default_time_to_live(category: Category) -> i64 {
    match category {
        Category::Access => defaults::ACCESS_TOKEN_TTL_SECONDS,
        Category::Refresh => defaults::REFRESH_TOKEN_TTL_SECONDS,
        Category::PasswordReset => defaults::RESET_TOKEN_TTL_SECONDS,
        Category::AuthCode => defaults::AUTH_CODE_TTL_SECONDS,
    }
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@example.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
