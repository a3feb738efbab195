use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use latchkey_application::AuthService;
use latchkey_core::{Credentials, NotificationService, TokenDetails, TokenStore, UserStore};
use serde::{Deserialize, Serialize};

use crate::error::AuthApiError;

#[derive(Serialize, Deserialize)]
pub struct AuthorizeResponse {
    pub code: String,
    pub expires: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CodeRequest {
    pub code: String,
}

#[tracing::instrument(name = "Authorize", skip_all, fields(user = %credentials.user))]
pub async fn authorize<U, T, N>(
    State(service): State<Arc<AuthService<U, T, N>>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthorizeResponse>, AuthApiError>
where
    U: UserStore + 'static,
    T: TokenStore + 'static,
    N: NotificationService + 'static,
{
    let code = service.authorize(&credentials).await?;
    Ok(Json(AuthorizeResponse {
        code: code.token,
        expires: code.expires,
    }))
}

#[tracing::instrument(name = "Exchange", skip_all)]
pub async fn exchange<U, T, N>(
    State(service): State<Arc<AuthService<U, T, N>>>,
    Json(request): Json<CodeRequest>,
) -> Result<Json<TokenDetails>, AuthApiError>
where
    U: UserStore + 'static,
    T: TokenStore + 'static,
    N: NotificationService + 'static,
{
    let tokens = service.exchange(&request.code).await?;
    Ok(Json(tokens))
}
