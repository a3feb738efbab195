use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use latchkey_adapters::{
    PostgresTokenStore, PostgresUserStore, PostmarkNotificationService, RedisTokenStore,
    config::{AuthServiceSetting, SessionStoreKind, prod},
};
use latchkey_auth_service::{
    AuthServer, TokenStore, build_auth_service, configure_postgresql, configure_redis,
    init_tracing, spawn_session_sweeper,
};
use latchkey_core::{Email, system_clock};
use reqwest::Client as HttpClient;
use tokio::{net::TcpListener, sync::RwLock};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = AuthServiceSetting::load().wrap_err("Failed to load configuration")?;

    let pg_pool = configure_postgresql(&settings.postgres)
        .await
        .wrap_err("Failed to set up PostgreSQL")?;

    match settings.auth.session_store {
        SessionStoreKind::Postgres => {
            let sessions = PostgresTokenStore::new(pg_pool.clone());
            serve(settings, pg_pool, sessions).await
        }
        SessionStoreKind::Redis => {
            let conn = configure_redis(&settings.redis).wrap_err("Failed to connect to Redis")?;
            let sessions = RedisTokenStore::new(Arc::new(RwLock::new(conn)), system_clock());
            serve(settings, pg_pool, sessions).await
        }
    }
}

async fn serve<T>(settings: AuthServiceSetting, pg_pool: sqlx::PgPool, sessions: T) -> Result<()>
where
    T: TokenStore + 'static,
{
    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;

    let notifications = PostmarkNotificationService::new(
        settings.email_client.base_url.clone(),
        Email::parse(&settings.email_client.sender).wrap_err("Invalid email sender")?,
        settings.email_client.auth_token.clone(),
        http_client,
    );

    let service = Arc::new(
        build_auth_service(
            &settings.auth,
            PostgresUserStore::new(pg_pool),
            sessions,
            notifications,
            system_clock(),
        )
        .wrap_err("Invalid token configuration")?,
    );

    let sweeper = spawn_session_sweeper(service.clone(), settings.auth.sweep_interval());

    let allowed_origins = settings.auth.allowed_origins.clone();
    let listener = TcpListener::bind(prod::APP_ADDRESS).await?;
    tracing::info!("Starting latchkey auth service...");

    let result = AuthServer::new(service)
        .run_standalone(listener, Some(allowed_origins))
        .await;

    sweeper.abort();
    result.wrap_err("Auth server stopped")
}
