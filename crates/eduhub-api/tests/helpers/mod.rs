//! Shared test helpers for API tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use eduhub_api::AppState;
use eduhub_api::router::build_router;
use eduhub_auth::JwtEncoder;
use eduhub_core::config::AppConfig;
use eduhub_entity::Role;

/// Password satisfying the policy, used for every seeded principal.
pub const PASSWORD: &str = "Passw0rd_1";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for seeding through the services
    pub state: AppState,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application on in-memory stores
    pub fn new() -> Self {
        let config = AppConfig::default();
        let state = AppState::in_memory(config.clone()).expect("Failed to build state");
        let router = build_router(state.clone());
        Self {
            router,
            state,
            config,
        }
    }

    /// Login and return the access token
    pub async fn login(&self, role_slug: &str, login: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                &format!("/api/auth/{role_slug}/login"),
                Some(json!({ "login": login, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Login as the configured SuperAdmin
    pub async fn super_admin_token(&self) -> String {
        let sa = &self.config.auth.super_admin;
        self.login("super-admin", &sa.login, &sa.password).await
    }

    /// Mint an access token directly, bypassing login
    pub fn token_for(&self, id: Uuid, role: Role) -> String {
        JwtEncoder::new(&self.config.auth)
            .issue_token_pair(id, role)
            .expect("Failed to issue token")
            .access_token
    }

    /// Create a principal under `resource` and return its `data` object
    pub async fn create_principal(&self, token: &str, resource: &str, fullname: &str) -> Value {
        let response = self
            .request(
                "POST",
                &format!("/api/{resource}"),
                Some(json!({
                    "fullname": fullname,
                    "phone": "+998901234567",
                    "password": PASSWORD,
                })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body["data"].clone()
    }

    /// Make an HTTP request to the test app
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

        self.send(method, path, body_str, token).await
    }

    /// Make an HTTP request with a raw body
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
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

impl TestResponse {
    /// The `error` code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
