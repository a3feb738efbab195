use serde_json::Value;

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn should_return_200_and_a_token_pair_for_valid_credentials() {
    let app = TestApp::new().await;
    app.create_user("alice", "alice@example.com", STRONG_PASSWORD)
        .await;

    let response = app.post_login("alice", STRONG_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert!(body["accessToken"]["token"].is_string());
    assert!(body["accessToken"]["expires"].is_string());
    assert!(body["refreshToken"]["token"].is_string());
    assert_eq!(body["accessToken"]["token"].as_str().unwrap().split('.').count(), 3);
}

#[tokio::test]
async fn should_return_401_for_wrong_password_or_unknown_user() {
    let app = TestApp::new().await;
    app.create_user("alice", "alice@example.com", STRONG_PASSWORD)
        .await;

    let wrong_password = app.post_login("alice", "letmein").await;
    let unknown_user = app.post_login("mallory", STRONG_PASSWORD).await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_user.status().as_u16(), 401);

    let first: Value = wrong_password.json().await.unwrap();
    let second: Value = unknown_user.json().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn should_return_422_for_malformed_input() {
    let app = TestApp::new().await;

    let test_cases = [
        serde_json::json!({ "user": "alice" }),
        serde_json::json!({ "password": STRONG_PASSWORD }),
        serde_json::json!({}),
    ];

    for test_case in test_cases {
        let response = app.post("/api/login", &test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
    }
}
