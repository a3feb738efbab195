mod auth_server;
mod helpers;
mod sweeper;
mod tracing;

pub use auth_server::AuthServer;
pub use helpers::{
    build_auth_service, configure_postgresql, configure_redis, get_postgres_pool,
    get_redis_client,
};
pub use sweeper::spawn_session_sweeper;
pub use self::tracing::init_tracing;

// Re-export commonly used types
pub use latchkey_adapters::config::{AllowedOrigins, AuthServiceSetting};
pub use latchkey_application::AuthService;
pub use latchkey_core::{NotificationService, TokenStore, UserStore};
