use latchkey_adapters::config::{AuthSetting, PostgresSetting, RedisSetting};
use latchkey_application::{
    AuthService, CredStore, TokenDetailsFactory, TokenError, TokenUrl,
};
use latchkey_core::{Category, Clock, NotificationService, TokenStore, UserStore};
use redis::{Client, RedisResult};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Wire an [`AuthService`] from the `auth` settings and the given
/// collaborators. Fails if any configured key is unusable.
pub fn build_auth_service<U, T, N>(
    auth: &AuthSetting,
    users: U,
    sessions: T,
    notifications: N,
    clock: Clock,
) -> Result<AuthService<U, T, N>, TokenError>
where
    U: UserStore,
    T: TokenStore,
    N: NotificationService,
{
    let token_details = TokenDetailsFactory::new(
        auth.access.factory(&auth.issuer, Category::Access)?,
        auth.refresh.factory(&auth.issuer, Category::Refresh)?,
        clock.clone(),
    )?;

    AuthService::new(
        CredStore::new(users, clock),
        token_details,
        auth.reset_token_factory()?,
        auth.auth_code.factory(&auth.issuer, Category::AuthCode)?,
        sessions,
        notifications,
        TokenUrl::for_host(&auth.hostname),
    )
}

/// Connect to PostgreSQL and run all pending migrations.
pub async fn configure_postgresql(settings: &PostgresSetting) -> Result<PgPool, sqlx::Error> {
    let pg_pool = get_postgres_pool(settings.url.expose_secret()).await?;

    sqlx::migrate!("../../migrations").run(&pg_pool).await?;

    Ok(pg_pool)
}

/// Open a synchronous Redis connection.
pub fn configure_redis(settings: &RedisSetting) -> RedisResult<redis::Connection> {
    get_redis_client(&settings.host_name)?.get_connection()
}

pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
