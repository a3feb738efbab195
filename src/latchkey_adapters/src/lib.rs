pub mod config;
pub mod notification;
pub mod persistence;

pub use notification::{MockNotificationService, PostmarkNotificationService};
pub use persistence::{
    HashMapTokenStore, HashMapUserStore, PostgresTokenStore, PostgresUserStore, RedisTokenStore,
};
