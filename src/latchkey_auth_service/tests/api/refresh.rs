use serde_json::Value;

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn should_return_a_fresh_access_token_for_a_live_session() {
    let app = TestApp::new().await;
    app.create_user("alice", "alice@example.com", STRONG_PASSWORD)
        .await;
    let (_, refresh_token) = app.login("alice", STRONG_PASSWORD).await;

    let response = app
        .post(
            "/api/refresh",
            &serde_json::json!({ "refreshToken": refresh_token }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let access_token = body["accessToken"].as_str().unwrap();
    let claims = app.service.validate_access_token(access_token).unwrap();
    assert_eq!(claims.subject, "alice");
}

#[tokio::test]
async fn should_return_401_after_logout() {
    let app = TestApp::new().await;
    app.create_user("alice", "alice@example.com", STRONG_PASSWORD)
        .await;
    let (_, refresh_token) = app.login("alice", STRONG_PASSWORD).await;
    let body = serde_json::json!({ "refreshToken": refresh_token });

    let response = app.post("/api/logout", &body).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.post("/api/refresh", &body).await;
    assert_eq!(response.status().as_u16(), 401);

    // Logging out twice is fine.
    let response = app.post("/api/logout", &body).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_401_for_an_access_token_or_garbage() {
    let app = TestApp::new().await;
    app.create_user("alice", "alice@example.com", STRONG_PASSWORD)
        .await;
    let (access_token, _) = app.login("alice", STRONG_PASSWORD).await;

    for token in [access_token.as_str(), "garbage", ""] {
        let response = app
            .post("/api/refresh", &serde_json::json!({ "refreshToken": token }))
            .await;
        assert_eq!(response.status().as_u16(), 401, "Failed for {token:?}");
    }
}
