mod exchange;
mod login;
mod logout;
mod password;
mod refresh;
mod register;

use std::sync::Arc;

use axum::{
    Router,
    routing::{patch, post},
};
use latchkey_application::AuthService;
use latchkey_core::{NotificationService, TokenStore, UserStore};

pub use exchange::{AuthorizeResponse, CodeRequest, authorize, exchange};
pub use login::login;
pub use logout::logout;
pub use password::{ForgotPasswordRequest, forgot_password, update_password};
pub use refresh::{RefreshRequest, RefreshResponse, refresh};
pub use register::{RegisterRequest, register};

/// All authentication routes, sharing one service.
pub fn auth_routes<U, T, N>(service: Arc<AuthService<U, T, N>>) -> Router
where
    U: UserStore + 'static,
    T: TokenStore + 'static,
    N: NotificationService + 'static,
{
    Router::new()
        .route("/api/login", post(login::<U, T, N>))
        .route("/api/refresh", post(refresh::<U, T, N>))
        .route("/api/logout", post(logout::<U, T, N>))
        .route("/api/register", post(register::<U, T, N>))
        .route("/api/password/forgot", post(forgot_password::<U, T, N>))
        .route("/api/password", patch(update_password::<U, T, N>))
        .route("/api/authorize", post(authorize::<U, T, N>))
        .route("/api/exchange", post(exchange::<U, T, N>))
        .with_state(service)
}
