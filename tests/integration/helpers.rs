//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::OnceLock;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use docshelf_api::{AppState, build_app, build_state};
use docshelf_auth::PasswordHasher;
use docshelf_core::config::AppConfig;

pub const ADMIN_PASSWORD: &str = "integration-admin";

const BOUNDARY: &str = "docshelf-test-boundary";

/// Test application over in-memory stores
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Wired application state, for direct access to services
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application with an admin account
    pub async fn new() -> Self {
        static HASH: OnceLock<String> = OnceLock::new();
        let hash = HASH
            .get_or_init(|| {
                PasswordHasher::new()
                    .hash_password(ADMIN_PASSWORD)
                    .expect("Failed to hash admin password")
            })
            .clone();

        let mut config = AppConfig::in_memory();
        config.auth.admin_password_hash = hash;
        config.auth.jwt_secret = "integration-secret".to_string();
        config.storage.max_upload_size_bytes = 1024 * 1024;

        let state = build_state(config)
            .await
            .expect("Failed to build application state");
        let router = build_app(state.clone());

        Self { router, state }
    }

    /// Send a JSON request and parse the JSON response
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload a file into a group through the multipart endpoint
    pub async fn upload(
        &self,
        group_id: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(format!("/api/groups/{group_id}/documents"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// GET a path and return status, headers and raw bytes
    pub async fn get_raw(&self, path: &str) -> (StatusCode, HeaderMap, Bytes) {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        (status, headers, bytes)
    }

    /// Log in as admin and return the bearer token
    pub async fn admin_token(&self) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "username": "admin",
                    "password": ADMIN_PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "admin login failed");
        response.body["data"]["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    /// Create a group and return its id
    pub async fn create_group(&self, name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/groups",
                Some(serde_json::json!({ "name": name })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "group create failed");
        response.body["data"]["id"]
            .as_str()
            .expect("group id missing")
            .to_string()
    }

    /// Group names in listed order
    pub async fn group_names(&self) -> Vec<String> {
        let response = self.request("GET", "/api/groups", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["data"]
            .as_array()
            .expect("data is not an array")
            .iter()
            .map(|g| g["name"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
