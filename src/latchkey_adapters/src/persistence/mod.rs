pub mod hashmap_token_store;
pub mod hashmap_user_store;
pub mod postgres_token_store;
pub mod postgres_user_store;
pub mod redis_token_store;

pub use hashmap_token_store::HashMapTokenStore;
pub use hashmap_user_store::HashMapUserStore;
pub use postgres_token_store::PostgresTokenStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_token_store::RedisTokenStore;
