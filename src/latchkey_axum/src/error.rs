use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use latchkey_application::AuthError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let AuthApiError::Auth(error) = self;

        let status_code = match &error {
            AuthError::Credentials | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::InvalidResetToken => StatusCode::NOT_FOUND,
            AuthError::UserExists | AuthError::EmailExists => StatusCode::CONFLICT,
            AuthError::InvalidUserId | AuthError::InvalidEmail | AuthError::PasswordTooSimple => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Unexpected(report) => {
                tracing::error!(error = ?report, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
        });

        (status_code, body).into_response()
    }
}
