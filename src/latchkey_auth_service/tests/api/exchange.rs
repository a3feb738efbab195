use serde_json::Value;

use crate::helpers::{STRONG_PASSWORD, TestApp};

async fn authorize(app: &TestApp) -> String {
    let response = app
        .post(
            "/api/authorize",
            &serde_json::json!({ "user": "alice", "password": STRONG_PASSWORD }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert!(body["expires"].is_string());
    body["code"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn should_exchange_an_auth_code_for_a_session() {
    let app = TestApp::new().await;
    app.create_user("alice", "alice@example.com", STRONG_PASSWORD)
        .await;
    let code = authorize(&app).await;

    let response = app
        .post("/api/exchange", &serde_json::json!({ "code": code }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let refresh_token = body["refreshToken"]["token"].as_str().unwrap();
    let response = app
        .post(
            "/api/refresh",
            &serde_json::json!({ "refreshToken": refresh_token }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn authorize_should_return_401_for_bad_credentials() {
    let app = TestApp::new().await;
    app.create_user("alice", "alice@example.com", STRONG_PASSWORD)
        .await;

    let response = app
        .post(
            "/api/authorize",
            &serde_json::json!({ "user": "alice", "password": "wrong" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn exchange_should_reject_anything_but_an_auth_code() {
    let app = TestApp::new().await;
    app.create_user("alice", "alice@example.com", STRONG_PASSWORD)
        .await;
    let (access_token, refresh_token) = app.login("alice", STRONG_PASSWORD).await;

    for code in [access_token.as_str(), refresh_token.as_str(), "garbage"] {
        let response = app
            .post("/api/exchange", &serde_json::json!({ "code": code }))
            .await;
        assert_eq!(response.status().as_u16(), 401, "Failed for {code:?}");
    }
}
