//! HTTP routes over [`AuthService`](latchkey_application::AuthService).
//!
//! Each handler decodes a JSON body, calls exactly one service operation and
//! maps the outcome to a status code. Handlers are generic over the service's
//! collaborators and take the service as `State<Arc<AuthService<..>>>`.

pub mod error;
pub mod routes;

pub use error::{AuthApiError, ErrorResponse};
pub use routes::auth_routes;
