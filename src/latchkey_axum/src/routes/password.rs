use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use latchkey_application::AuthService;
use latchkey_core::{NotificationService, TokenStore, UpdatePasswordPayload, UserId, UserStore};
use serde::Deserialize;

use crate::error::AuthApiError;

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub user: UserId,
}

/// Always answers 200 for a well-formed request, whether or not the user
/// exists.
#[tracing::instrument(name = "Forgot password", skip_all, fields(user = %request.user))]
pub async fn forgot_password<U, T, N>(
    State(service): State<Arc<AuthService<U, T, N>>>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, AuthApiError>
where
    U: UserStore + 'static,
    T: TokenStore + 'static,
    N: NotificationService + 'static,
{
    service.forgot_password(&request.user).await?;
    Ok(StatusCode::OK)
}

#[tracing::instrument(name = "Update password", skip_all, fields(user = %payload.user))]
pub async fn update_password<U, T, N>(
    State(service): State<Arc<AuthService<U, T, N>>>,
    Json(payload): Json<UpdatePasswordPayload>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + 'static,
    T: TokenStore + 'static,
    N: NotificationService + 'static,
{
    service.update_password(payload).await?;
    Ok((StatusCode::OK, "Password updated"))
}
