use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use latchkey_application::AuthService;
use latchkey_core::{NotificationService, TokenStore, UserStore};

use super::refresh::RefreshRequest;
use crate::error::AuthApiError;

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<U, T, N>(
    State(service): State<Arc<AuthService<U, T, N>>>,
    Json(request): Json<RefreshRequest>,
) -> Result<StatusCode, AuthApiError>
where
    U: UserStore + 'static,
    T: TokenStore + 'static,
    N: NotificationService + 'static,
{
    service.logout(&request.refresh_token).await?;
    Ok(StatusCode::OK)
}
