use reqwest::{Method, header};

use crate::helpers::{ALLOWED_ORIGIN, TestApp};

async fn preflight(app: &TestApp, origin: &str) -> reqwest::Response {
    app.http_client
        .request(Method::OPTIONS, format!("{}/api/login", &app.address))
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .send()
        .await
        .expect("Failed to execute request.")
}

#[tokio::test]
async fn should_allow_a_configured_origin() {
    let app = TestApp::new().await;

    let response = preflight(&app, ALLOWED_ORIGIN).await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some(ALLOWED_ORIGIN)
    );
}

#[tokio::test]
async fn should_not_allow_other_origins() {
    let app = TestApp::new().await;

    let response = preflight(&app, "https://evil.example.com").await;

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
