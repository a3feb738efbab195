use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use latchkey_application::AuthService;
use latchkey_core::{NotificationService, TokenStore, UserStore};
use serde::{Deserialize, Serialize};

use crate::error::AuthApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires: DateTime<Utc>,
}

#[tracing::instrument(name = "Refresh", skip_all)]
pub async fn refresh<U, T, N>(
    State(service): State<Arc<AuthService<U, T, N>>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AuthApiError>
where
    U: UserStore + 'static,
    T: TokenStore + 'static,
    N: NotificationService + 'static,
{
    let access_token = service.refresh(&request.refresh_token).await?;
    Ok(Json(RefreshResponse {
        access_token: access_token.token,
        expires: access_token.expires,
    }))
}
