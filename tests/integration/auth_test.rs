//! Integration tests for admin login and token gating.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "admin", "password": helpers::ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].as_str().is_some());
    assert_eq!(response.body["data"]["token_type"], "Bearer");
    assert!(response.body["data"]["expires_at"].as_str().is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "admin", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_wrong_username_looks_the_same() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "root", "password": helpers::ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_empty_fields() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "", "password": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_issued_token_opens_admin_routes() {
    let app = helpers::TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .request("POST", "/api/groups/renumber", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["updated"], 0);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"]["backend"], "memory");
}
