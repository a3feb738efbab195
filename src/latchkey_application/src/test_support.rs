//! Fixtures shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use latchkey_core::{
    Category, Clock, Notification, NotificationError, NotificationService, Token, TokenStore,
    TokenStoreError, UserEntry, UserId, UserStore, UserStoreError,
};
use tokio::sync::RwLock;

use crate::{
    AuthService, CredStore, ResetTokenFactory, TokenDetailsFactory, TokenFactory, TokenUrl,
};

pub const ACCESS_PRIVATE_KEY: &str = include_str!("../../../keys/access.pem");
pub const ACCESS_PUBLIC_KEY: &str = include_str!("../../../keys/access.pub");
pub const REFRESH_PRIVATE_KEY: &str = include_str!("../../../keys/refresh.pem");
pub const REFRESH_PUBLIC_KEY: &str = include_str!("../../../keys/refresh.pub");
pub const RESET_PRIVATE_KEY: &str = include_str!("../../../keys/reset.pem");
pub const RESET_PUBLIC_KEY: &str = include_str!("../../../keys/reset.pub");
pub const AUTH_CODE_PRIVATE_KEY: &str = include_str!("../../../keys/auth_code.pem");
pub const AUTH_CODE_PUBLIC_KEY: &str = include_str!("../../../keys/auth_code.pub");

pub const ISSUER: &str = "issuer";
pub const STRONG_PASSWORD: &str = "vivid-Otter-canal-7319-quartz";

/// 2022-01-01T00:00:00Z
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()
}

/// A clock that only moves when told to.
#[derive(Clone)]
pub struct TestClock(Arc<AtomicI64>);

impl TestClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(Arc::new(AtomicI64::new(start.timestamp())))
    }

    pub fn clock(&self) -> Clock {
        let seconds = self.0.clone();
        Arc::new(move || DateTime::from_timestamp(seconds.load(Ordering::SeqCst), 0).unwrap())
    }

    pub fn advance(&self, by: TimeDelta) {
        self.0.fetch_add(by.num_seconds(), Ordering::SeqCst);
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock())()
    }
}

fn factory(category: Category, validity: TimeDelta, private: &str, public: &str) -> TokenFactory {
    TokenFactory::from_ec_pem(
        ISSUER,
        category,
        validity,
        private.as_bytes(),
        public.as_bytes(),
    )
    .unwrap()
}

pub fn access_factory(validity: TimeDelta) -> TokenFactory {
    factory(Category::Access, validity, ACCESS_PRIVATE_KEY, ACCESS_PUBLIC_KEY)
}

pub fn refresh_factory(validity: TimeDelta) -> TokenFactory {
    factory(Category::Refresh, validity, REFRESH_PRIVATE_KEY, REFRESH_PUBLIC_KEY)
}

pub fn reset_factory(validity: TimeDelta) -> ResetTokenFactory {
    ResetTokenFactory::new(factory(
        Category::PasswordReset,
        validity,
        RESET_PRIVATE_KEY,
        RESET_PUBLIC_KEY,
    ))
    .unwrap()
}

pub fn auth_code_factory(validity: TimeDelta) -> TokenFactory {
    factory(Category::AuthCode, validity, AUTH_CODE_PRIVATE_KEY, AUTH_CODE_PUBLIC_KEY)
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<UserId, UserEntry>>>,
}

impl MockUserStore {
    pub async fn entry(&self, user: &str) -> Option<UserEntry> {
        self.users.read().await.get(&UserId::parse(user).unwrap()).cloned()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn get(&self, user: &UserId) -> Result<UserEntry, UserStoreError> {
        self.users
            .read()
            .await
            .get(user)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn create(&self, entry: UserEntry) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&entry.user) {
            return Err(UserStoreError::UserExists);
        }
        if users.values().any(|existing| existing.email == entry.email) {
            return Err(UserStoreError::EmailExists);
        }
        users.insert(entry.user.clone(), entry);
        Ok(())
    }

    async fn upsert(&self, mut entry: UserEntry) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if let Some(existing) = users.get(&entry.user) {
            entry.created = existing.created;
        }
        users.insert(entry.user.clone(), entry);
        Ok(())
    }
}

/// A user store whose backend is always down.
#[derive(Clone)]
pub struct FailingUserStore;

#[async_trait::async_trait]
impl UserStore for FailingUserStore {
    async fn get(&self, _user: &UserId) -> Result<UserEntry, UserStoreError> {
        Err(UserStoreError::UnexpectedError("connection reset".to_owned()))
    }

    async fn create(&self, _entry: UserEntry) -> Result<(), UserStoreError> {
        Err(UserStoreError::UnexpectedError("connection reset".to_owned()))
    }

    async fn upsert(&self, _entry: UserEntry) -> Result<(), UserStoreError> {
        Err(UserStoreError::UnexpectedError("connection reset".to_owned()))
    }
}

#[derive(Clone, Default)]
pub struct MockTokenStore {
    tokens: Arc<RwLock<HashMap<String, Token>>>,
}

impl MockTokenStore {
    pub async fn contains(&self, token: &str) -> bool {
        self.tokens.read().await.contains_key(token)
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait::async_trait]
impl TokenStore for MockTokenStore {
    async fn put(&self, token: &Token) -> Result<(), TokenStoreError> {
        self.tokens
            .write()
            .await
            .insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn exists(&self, token: &str) -> Result<(), TokenStoreError> {
        if self.contains(token).await {
            Ok(())
        } else {
            Err(TokenStoreError::TokenNotFound)
        }
    }

    async fn delete(&self, token: &str) -> Result<(), TokenStoreError> {
        self.tokens.write().await.remove(token);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Token>, TokenStoreError> {
        Ok(self.tokens.read().await.values().cloned().collect())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<(), TokenStoreError> {
        self.tokens.write().await.retain(|_, token| token.expires >= now);
        Ok(())
    }
}

/// A token store whose backend is always down.
#[derive(Clone)]
pub struct FailingTokenStore;

#[async_trait::async_trait]
impl TokenStore for FailingTokenStore {
    async fn put(&self, _token: &Token) -> Result<(), TokenStoreError> {
        Err(TokenStoreError::UnexpectedError("timeout".to_owned()))
    }

    async fn exists(&self, _token: &str) -> Result<(), TokenStoreError> {
        Err(TokenStoreError::UnexpectedError("timeout".to_owned()))
    }

    async fn delete(&self, _token: &str) -> Result<(), TokenStoreError> {
        Err(TokenStoreError::UnexpectedError("timeout".to_owned()))
    }

    async fn list(&self) -> Result<Vec<Token>, TokenStoreError> {
        Err(TokenStoreError::UnexpectedError("timeout".to_owned()))
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<(), TokenStoreError> {
        Err(TokenStoreError::UnexpectedError("timeout".to_owned()))
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifications {
    sent: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotifications {
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl NotificationService for RecordingNotifications {
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        self.sent.write().await.push(notification);
        Ok(())
    }
}

pub type TestService<U = MockUserStore, T = MockTokenStore> =
    AuthService<U, T, RecordingNotifications>;

/// An [`AuthService`] wired to in-memory collaborators and a [`TestClock`]
/// starting at [`t0`], with the production validity windows.
pub struct Harness<U = MockUserStore, T = MockTokenStore> {
    pub clock: TestClock,
    pub users: U,
    pub sessions: T,
    pub notifications: RecordingNotifications,
    pub service: TestService<U, T>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_stores(MockUserStore::default(), MockTokenStore::default())
    }
}

impl<U, T> Harness<U, T>
where
    U: UserStore + Clone,
    T: TokenStore + Clone,
{
    pub fn with_stores(users: U, sessions: T) -> Self {
        Self::with_refresh_validity(users, sessions, TimeDelta::days(7))
    }

    pub fn with_refresh_validity(users: U, sessions: T, refresh_validity: TimeDelta) -> Self {
        let clock = TestClock::new(t0());
        let notifications = RecordingNotifications::default();

        let token_details = TokenDetailsFactory::new(
            access_factory(TimeDelta::minutes(15)),
            refresh_factory(refresh_validity),
            clock.clock(),
        )
        .unwrap();

        let service = AuthService::new(
            CredStore::new(users.clone(), clock.clock()),
            token_details,
            reset_factory(TimeDelta::hours(1)),
            auth_code_factory(TimeDelta::minutes(1)),
            sessions.clone(),
            notifications.clone(),
            TokenUrl::for_host("auth.example.com"),
        )
        .unwrap();

        Self {
            clock,
            users,
            sessions,
            notifications,
            service,
        }
    }
}
