use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use latchkey_application::AuthService;
use latchkey_core::{NotificationService, TokenStore, UserStore};
use serde::Deserialize;

use crate::error::AuthApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub user: String,
    pub email: String,
}

#[tracing::instrument(name = "Register", skip_all, fields(user = %request.user))]
pub async fn register<U, T, N>(
    State(service): State<Arc<AuthService<U, T, N>>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + 'static,
    T: TokenStore + 'static,
    N: NotificationService + 'static,
{
    service.register(&request.user, &request.email).await?;
    Ok((StatusCode::CREATED, "Created user"))
}
