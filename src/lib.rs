//! # Latchkey
//!
//! Facade over the latchkey workspace: signed session tokens, a credential
//! store with a password policy, and the HTTP service that exposes them.
//!
//! ## Structure
//!
//! - **Domain**: `Claims`, `Token`, `TokenDetails`, `Credentials`, `UserEntry`
//! - **Ports**: `UserStore`, `TokenStore`, `NotificationService`
//! - **Application**: `AuthService`, `CredStore`, the token factories
//! - **Adapters**: in-memory, PostgreSQL and Redis stores; Postmark and mock
//!   notification services; settings
//! - **Service**: `AuthServer`, the session sweeper and wiring helpers

// ============================================================================
// Domain
// ============================================================================

/// Domain types, ports and the clock.
pub mod core {
    pub use latchkey_core::*;
}

pub use latchkey_core::{
    Category, Claims, Clock, Credentials, Email, Notification, NotificationKind, Password,
    PasswordHash, Token, TokenDetails, UpdatePasswordPayload, UserEntry, UserId, UserIdError,
    fixed_clock, system_clock,
};

// ============================================================================
// Ports
// ============================================================================

pub use latchkey_core::{
    NotificationError, NotificationService, TokenStore, TokenStoreError, UserStore,
    UserStoreError,
};

// ============================================================================
// Application
// ============================================================================

/// Token factories, the credential store and the auth service.
pub mod application {
    pub use latchkey_application::*;
}

pub use latchkey_application::{
    AuthError, AuthService, CredStore, CredStoreError, EntropyPolicy, PasswordPolicy,
    ResetTokenFactory, TokenDetailsFactory, TokenError, TokenFactory, TokenUrl,
};

// ============================================================================
// Adapters
// ============================================================================

/// Store and notification implementations, plus settings.
pub mod adapters {
    pub mod persistence {
        pub use latchkey_adapters::persistence::*;
    }

    pub mod notification {
        pub use latchkey_adapters::notification::*;
    }

    pub mod config {
        pub use latchkey_adapters::config::*;
    }

    /// JSON routes for embedding the service into another axum application.
    pub mod http {
        pub use latchkey_axum::*;
    }
}

pub use latchkey_adapters::{
    HashMapTokenStore, HashMapUserStore, MockNotificationService, PostgresTokenStore,
    PostgresUserStore, PostmarkNotificationService, RedisTokenStore,
};

// ============================================================================
// Service
// ============================================================================

pub use latchkey_auth_service::{
    AllowedOrigins, AuthServer, AuthServiceSetting, build_auth_service, configure_postgresql,
    configure_redis, spawn_session_sweeper,
};

// ============================================================================
// Re-exported dependencies
// ============================================================================

/// For implementing the store and notification ports.
pub use async_trait::async_trait;

pub use secrecy::{ExposeSecret, Secret};
