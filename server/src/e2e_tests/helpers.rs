//! Common helpers for end-to-end tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::{PasswordHasher, TokenService};
use crate::bootstrap::seed_admin;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryUserStore, UserStore};

pub const ADMIN_EMAIL: &str = "admin@fintrust.com";
pub const ADMIN_PASSWORD: &str = "admin-test-password";
pub const JWT_SECRET: &[u8] = b"e2e-test-secret-key-that-is-long-enough";

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
const TEST_BCRYPT_COST: u32 = 4;

/// A router over a fresh store holding only the seeded admin.
pub struct TestApp {
    router: Router,
    /// Direct handle on the store for assertions.
    pub store: Arc<InMemoryUserStore>,
    /// Token service sharing the router's secret.
    pub tokens: TokenService,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryUserStore::new());
        let passwords = PasswordHasher::new(TEST_BCRYPT_COST);
        let tokens = TokenService::new(JWT_SECRET).expect("valid secret");

        seed_admin(store.as_ref(), &passwords, ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("seed admin");

        let dyn_store: Arc<dyn UserStore> = Arc::clone(&store) as Arc<dyn UserStore>;
        let state = AppState::new(dyn_store, passwords, tokens.clone(), ADMIN_EMAIL);

        Self {
            router: build_router(state),
            store,
            tokens,
        }
    }

    /// Send a request and return the status plus the decoded JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    /// Send a fully built request and return the raw response.
    pub async fn respond(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a fully built request.
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.respond(request).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is JSON")
        };
        (status, json)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(serde_json::json!({ "name": name, "email": email, "password": password })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Register a customer and return `(id, token)`.
    pub async fn register_customer(&self, name: &str, email: &str, password: &str) -> (String, String) {
        let (status, body) = self.register(name, email, password).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        (string_field(&body, "id"), string_field(&body, "token"))
    }

    /// Log in as the seeded admin and return the token.
    pub async fn admin_token(&self) -> String {
        let (status, body) = self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
        string_field(&body, "token")
    }

    pub async fn freeze(&self, token: &str, id: &str) -> (StatusCode, Value) {
        self.send(
            Method::PUT,
            &format!("/api/admin/users/{id}/freeze"),
            Some(token),
            None,
        )
        .await
    }
}

/// Read a string field out of a JSON object, panicking if absent.
pub fn string_field(body: &Value, field: &str) -> String {
    body[field]
        .as_str()
        .unwrap_or_else(|| panic!("missing string field {field} in {body}"))
        .to_string()
}

pub fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}
