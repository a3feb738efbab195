pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, AuthServiceSetting, AuthSetting, EmailClientSetting, PostgresSetting,
    RedisSetting, SessionStoreKind, TokenSetting,
};
