use std::sync::Arc;

use axum::{Json, extract::State};
use latchkey_application::AuthService;
use latchkey_core::{Credentials, NotificationService, TokenDetails, TokenStore, UserStore};

use crate::error::AuthApiError;

#[tracing::instrument(name = "Login", skip_all, fields(user = %credentials.user))]
pub async fn login<U, T, N>(
    State(service): State<Arc<AuthService<U, T, N>>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<TokenDetails>, AuthApiError>
where
    U: UserStore + 'static,
    T: TokenStore + 'static,
    N: NotificationService + 'static,
{
    let tokens = service.login(&credentials).await?;
    Ok(Json(tokens))
}
