use std::sync::Arc;

use latchkey_adapters::{
    HashMapTokenStore, HashMapUserStore, MockNotificationService,
    config::{AllowedOrigins, AuthServiceSetting, test},
};
use latchkey_auth_service::{AuthServer, AuthService, build_auth_service};
use latchkey_core::{Credentials, Email, Password, UserId, system_clock};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;

pub const ALLOWED_ORIGIN: &str = "https://app.example.com";
pub const STRONG_PASSWORD: &str = "vivid-Otter-canal-7319-quartz";

const ACCESS_PRIVATE_KEY: &str = include_str!("../../../../keys/access.pem");
const ACCESS_PUBLIC_KEY: &str = include_str!("../../../../keys/access.pub");
const REFRESH_PRIVATE_KEY: &str = include_str!("../../../../keys/refresh.pem");
const REFRESH_PUBLIC_KEY: &str = include_str!("../../../../keys/refresh.pub");
const RESET_PRIVATE_KEY: &str = include_str!("../../../../keys/reset.pem");
const RESET_PUBLIC_KEY: &str = include_str!("../../../../keys/reset.pub");
const AUTH_CODE_PRIVATE_KEY: &str = include_str!("../../../../keys/auth_code.pem");
const AUTH_CODE_PUBLIC_KEY: &str = include_str!("../../../../keys/auth_code.pub");

pub type TestService = AuthService<HashMapUserStore, HashMapTokenStore, MockNotificationService>;

pub fn test_settings() -> AuthServiceSetting {
    let key = |private: &str, public: &str| {
        serde_json::json!({ "private_key": private, "public_key": public })
    };
    let settings = serde_json::json!({
        "auth": {
            "issuer": "latchkey-test",
            "hostname": "auth.example.com",
            "access": key(ACCESS_PRIVATE_KEY, ACCESS_PUBLIC_KEY),
            "refresh": key(REFRESH_PRIVATE_KEY, REFRESH_PUBLIC_KEY),
            "reset": key(RESET_PRIVATE_KEY, RESET_PUBLIC_KEY),
            "auth_code": key(AUTH_CODE_PRIVATE_KEY, AUTH_CODE_PUBLIC_KEY),
        },
        "postgres": { "url": "postgres://unused" },
        "redis": { "host_name": "unused" },
        "email_client": {
            "sender": test::email_client::SENDER,
            "auth_token": "unused",
        },
    });
    AuthServiceSetting::from_json(&settings.to_string()).unwrap()
}

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub users: HashMapUserStore,
    pub sessions: HashMapTokenStore,
    pub notifications: MockNotificationService,
    pub service: Arc<TestService>,
}

impl TestApp {
    pub async fn new() -> Self {
        let users = HashMapUserStore::new();
        let sessions = HashMapTokenStore::new();
        let notifications = MockNotificationService::new();

        let service = Arc::new(
            build_auth_service(
                &test_settings().auth,
                users.clone(),
                sessions.clone(),
                notifications.clone(),
                system_clock(),
            )
            .unwrap(),
        );

        let listener = TcpListener::bind(test::APP_ADDRESS).await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let server = AuthServer::new(service.clone());
        tokio::spawn(async move {
            server
                .run_standalone(listener, Some(AllowedOrigins::new([ALLOWED_ORIGIN])))
                .await
                .unwrap();
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
            users,
            sessions,
            notifications,
            service,
        }
    }

    /// Create an account with a usable password, bypassing the HTTP API.
    pub async fn create_user(&self, user: &str, email: &str, password: &str) {
        self.service
            .creds()
            .create(
                Credentials::new(UserId::parse(user).unwrap(), Password::new(password))
                    .with_email(Email::parse(email).unwrap()),
            )
            .await
            .unwrap();
    }

    /// The token carried by the most recent notification.
    pub async fn last_notified_token(&self) -> String {
        let sent = self.notifications.sent().await;
        let last = sent.last().expect("no notification was sent");
        last.token_url.split_once("?t=").unwrap().1.to_owned()
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> reqwest::Response {
        self.http_client
            .patch(format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login(&self, user: &str, password: &str) -> reqwest::Response {
        self.post(
            "/api/login",
            &serde_json::json!({ "user": user, "password": password }),
        )
        .await
    }

    /// Log in and return the `(access, refresh)` token strings.
    pub async fn login(&self, user: &str, password: &str) -> (String, String) {
        let response = self.post_login(user, password).await;
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        (
            body["accessToken"]["token"].as_str().unwrap().to_owned(),
            body["refreshToken"]["token"].as_str().unwrap().to_owned(),
        )
    }
}
