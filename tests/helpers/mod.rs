//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use shop_auth::{PasswordHasher, RevocationRegistry};
use shop_core::config::AppConfig;
use shop_database::{MemoryUserRepository, UserStore};
use shop_entity::user::{NewUser, ShippingAddress, UserRole};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct setup
    pub users: Arc<MemoryUserRepository>,
    /// Logout blocklist
    pub revocations: Arc<RevocationRegistry>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let users = Arc::new(MemoryUserRepository::new());
        let revocations = Arc::new(RevocationRegistry::new());

        let state = shop_api::AppState::new(
            config.clone(),
            users.clone(),
            users.clone(),
            Arc::clone(&revocations),
        )
        .expect("Failed to build app state");

        Self {
            router: shop_api::build_app(state),
            users,
            revocations,
            config,
        }
    }

    /// Create a test user and return their ID
    pub async fn create_test_user(&self, email: &str, password: &str, role: UserRole) -> Uuid {
        let hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");

        self.users
            .insert(NewUser {
                name: email.split('@').next().unwrap_or(email).to_string(),
                email: email.to_string(),
                password_hash: hash,
                role,
                shipping_address: ShippingAddress::default(),
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Login and return the session token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self.request("POST", "/auth/login", Some(body), None).await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
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

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

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
