use color_eyre::eyre::Report;
use latchkey_core::{
    Category, Claims, Clock, Credentials, Email, Notification, NotificationKind,
    NotificationService, Token, TokenDetails, TokenStore, TokenStoreError, UpdatePasswordPayload,
    UserId, UserStore,
};

use crate::{
    credentials::cred_store::{CredStore, CredStoreError},
    error::AuthError,
    tokens::{
        reset_token_factory::ResetTokenFactory, token_details_factory::TokenDetailsFactory,
        token_factory::{TokenError, TokenFactory},
    },
};

/// Builds the link a notification points the recipient to.
#[derive(Debug, Clone)]
pub struct TokenUrl {
    base: String,
}

impl TokenUrl {
    /// `https://{hostname}/password`
    pub fn for_host(hostname: &str) -> Self {
        Self::new(format!("https://{hostname}/password"))
    }

    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn build(&self, token: &Token) -> String {
        format!("{}?t={}", self.base, token.token)
    }
}

fn unexpected(error: impl std::error::Error + Send + Sync + 'static, context: &'static str) -> AuthError {
    AuthError::Unexpected(Report::new(error).wrap_err(context))
}

/// Composes credentials, token factories, the session ledger and the
/// notification channel into the public authentication operations.
///
/// Holds no mutable state of its own; every method can be called
/// concurrently.
pub struct AuthService<U, T, N> {
    creds: CredStore<U>,
    token_details: TokenDetailsFactory,
    reset_tokens: ResetTokenFactory,
    auth_codes: TokenFactory,
    sessions: T,
    notifications: N,
    token_url: TokenUrl,
    clock: Clock,
}

impl<U, T, N> AuthService<U, T, N>
where
    U: UserStore,
    T: TokenStore,
    N: NotificationService,
{
    /// `auth_codes` must be an auth-code factory. The service reads time
    /// from the clock of `token_details`.
    pub fn new(
        creds: CredStore<U>,
        token_details: TokenDetailsFactory,
        reset_tokens: ResetTokenFactory,
        auth_codes: TokenFactory,
        sessions: T,
        notifications: N,
        token_url: TokenUrl,
    ) -> Result<Self, TokenError> {
        if auth_codes.category() != Category::AuthCode {
            return Err(TokenError::CategoryMismatch {
                expected: Category::AuthCode,
                found: auth_codes.category(),
            });
        }

        let clock = token_details.clock().clone();
        Ok(Self {
            creds,
            token_details,
            reset_tokens,
            auth_codes,
            sessions,
            notifications,
            token_url,
            clock,
        })
    }

    pub fn creds(&self) -> &CredStore<U> {
        &self.creds
    }

    /// Check credentials and open a new session.
    #[tracing::instrument(name = "AuthService::login", skip_all, fields(user = %credentials.user))]
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenDetails, AuthError> {
        self.creds.validate(credentials).await?;
        let details = self.open_session(credentials.user.as_str()).await?;
        tracing::info!("authentication succeeded");
        Ok(details)
    }

    /// Mint a fresh access token for a live session. The refresh token and
    /// its session record are left untouched.
    #[tracing::instrument(name = "AuthService::refresh", skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token, AuthError> {
        let claims = self
            .token_details
            .validate_refresh_token(refresh_token)
            .map_err(|_| AuthError::Unauthorized)?;

        match self.sessions.exists(refresh_token).await {
            Ok(()) => {}
            Err(TokenStoreError::TokenNotFound) => {
                tracing::debug!(user = %claims.subject, "refresh token has no live session");
                return Err(AuthError::Unauthorized);
            }
            Err(e) => return Err(unexpected(e, "checking refresh session")),
        }

        self.token_details
            .access_token(&claims.subject)
            .map_err(|e| unexpected(e, "issuing access token"))
    }

    /// Close the session keyed by `refresh_token`. Closing an unknown
    /// session succeeds.
    #[tracing::instrument(name = "AuthService::logout", skip_all)]
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.sessions
            .delete(refresh_token)
            .await
            .map_err(|e| unexpected(e, "deleting refresh session"))
    }

    /// Create an account without a password and send its owner a link to
    /// set one.
    #[tracing::instrument(name = "AuthService::register", skip(self, email))]
    pub async fn register(&self, user: &str, email: &str) -> Result<(), AuthError> {
        let user = UserId::parse(user).map_err(|_| AuthError::InvalidUserId)?;
        let email = Email::parse(email).map_err(|_| AuthError::InvalidEmail)?;

        self.creds
            .create_pending(user.clone(), email.clone())
            .await?;

        self.send_reset_link(user, email, NotificationKind::Registration)
            .await
    }

    /// Send a password reset link. Unknown users get the same success
    /// result and no notification.
    #[tracing::instrument(name = "AuthService::forgot_password", skip(self))]
    pub async fn forgot_password(&self, user: &UserId) -> Result<(), AuthError> {
        let entry = match self.creds.get(user).await {
            Ok(entry) => entry,
            Err(CredStoreError::UserNotFound) => {
                tracing::info!("user not found; silently succeeding");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.send_reset_link(entry.user, entry.email, NotificationKind::ForgotPassword)
            .await
    }

    /// Set a new password using a reset token minted for the same user.
    #[tracing::instrument(name = "AuthService::update_password", skip_all, fields(user = %payload.user))]
    pub async fn update_password(&self, payload: UpdatePasswordPayload) -> Result<(), AuthError> {
        self.reset_tokens
            .validate(&payload.token, (self.clock)(), &payload.user)
            .map_err(|_| AuthError::InvalidResetToken)?;

        match self
            .creds
            .update_password(&payload.user, payload.password)
            .await
        {
            Ok(()) => {
                tracing::info!("updated password");
                Ok(())
            }
            // The token outlived the account.
            Err(CredStoreError::UserNotFound) => Err(AuthError::InvalidResetToken),
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and mint a short-lived auth code. No session is
    /// opened until the code is exchanged.
    #[tracing::instrument(name = "AuthService::authorize", skip_all, fields(user = %credentials.user))]
    pub async fn authorize(&self, credentials: &Credentials) -> Result<Token, AuthError> {
        self.creds.validate(credentials).await?;
        self.auth_codes
            .create((self.clock)(), credentials.user.as_str())
            .map_err(|e| unexpected(e, "issuing auth code"))
    }

    /// Trade an auth code for a new session.
    ///
    /// A code stays usable until it expires; nothing records its use.
    #[tracing::instrument(name = "AuthService::exchange", skip_all)]
    pub async fn exchange(&self, code: &str) -> Result<TokenDetails, AuthError> {
        let claims = self
            .auth_codes
            .validate(code, (self.clock)())
            .map_err(|_| AuthError::Unauthorized)?;

        let details = self.open_session(&claims.subject).await?;
        tracing::info!(user = %claims.subject, "auth code valid; returning tokens");
        Ok(details)
    }

    /// Verify an access token and return its claims.
    #[tracing::instrument(name = "AuthService::validate_access_token", skip_all)]
    pub fn validate_access_token(&self, access_token: &str) -> Result<Claims, AuthError> {
        self.token_details
            .validate_access_token(access_token)
            .map_err(|_| AuthError::Unauthorized)
    }

    /// Drop every session whose refresh token has already expired.
    #[tracing::instrument(name = "AuthService::sweep_expired_sessions", skip_all)]
    pub async fn sweep_expired_sessions(&self) -> Result<(), AuthError> {
        self.sessions
            .delete_expired((self.clock)())
            .await
            .map_err(|e| unexpected(e, "deleting expired sessions"))
    }

    async fn open_session(&self, subject: &str) -> Result<TokenDetails, AuthError> {
        let details = self
            .token_details
            .create(subject)
            .map_err(|e: TokenError| unexpected(e, "issuing token pair"))?;

        self.sessions
            .put(&details.refresh_token)
            .await
            .map_err(|e| unexpected(e, "storing refresh session"))?;

        Ok(details)
    }

    async fn send_reset_link(
        &self,
        user: UserId,
        email: Email,
        kind: NotificationKind,
    ) -> Result<(), AuthError> {
        let token = self
            .reset_tokens
            .create((self.clock)(), &user)
            .map_err(|e| unexpected(e, "issuing password reset token"))?;

        let notification = Notification {
            user,
            email,
            token_url: self.token_url.build(&token),
            kind,
        };

        self.notifications
            .notify(notification)
            .await
            .map_err(|e| unexpected(e, "sending notification"))?;

        tracing::info!(?kind, "password reset notification sent");
        Ok(())
    }
}
