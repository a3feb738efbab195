use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
};
use latchkey_adapters::config::AllowedOrigins;
use latchkey_application::AuthService;
use latchkey_axum::auth_routes;
use latchkey_core::{NotificationService, TokenStore, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// HTTP front of an [`AuthService`].
pub struct AuthServer {
    router: Router,
}

impl AuthServer {
    pub fn new<U, T, N>(service: Arc<AuthService<U, T, N>>) -> Self
    where
        U: UserStore + 'static,
        T: TokenStore + 'static,
        N: NotificationService + 'static,
    {
        Self {
            router: auth_routes(service),
        }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a router that can be nested into another application.
    ///
    /// With `allowed_origins`, cross-origin requests are accepted from
    /// exactly those origins.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        origin
                            .to_str()
                            .is_ok_and(|origin| allowed_origins.contains(origin))
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serve on `listener` until the process stops.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
