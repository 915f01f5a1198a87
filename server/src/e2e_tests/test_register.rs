//! Test account registration.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::json;

use crate::e2e_tests::helpers::*;
use crate::store::UserStore;

#[tokio::test]
async fn test_register_returns_201_with_token() {
    let app = TestApp::new().await;

    let (status, body) = app.register("A", "a@x.com", "p1").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "A");
    assert_eq!(body["email"], "a@x.com");

    let id = string_field(&body, "id");
    let token = string_field(&body, "token");
    assert!(id.starts_with("user-"));
    assert!(!token.is_empty());

    // The token verifies independently of the router.
    let claims = app.tokens.verify(&token).expect("valid token");
    assert_eq!(claims.sub, id);
    assert!(!claims.is_admin);
}

#[tokio::test]
async fn test_register_creates_customer_record() {
    let app = TestApp::new().await;

    let (id, _) = app.register_customer("A", "a@x.com", "p1").await;

    let user = app.store.find_by_id(&id).unwrap().expect("stored user");
    assert!(!user.is_admin);
    assert!(!user.is_frozen);
    assert_eq!(user.investments, 0);
    assert_eq!(user.loans, 0);
    assert_ne!(user.password_hash, "p1");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::new().await;
    let bodies = [
        json!({ "email": "a@x.com", "password": "p1" }),
        json!({ "name": "A", "password": "p1" }),
        json!({ "name": "A", "email": "a@x.com" }),
        json!({ "name": "", "email": "a@x.com", "password": "p1" }),
        json!({}),
    ];

    for body in bodies {
        let (status, response) = app
            .send(Method::POST, "/api/auth/register", None, Some(body.clone()))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(message(&response), "Name, email, and password required");
    }

    assert_eq!(app.store.len().unwrap(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email_does_not_mutate() {
    let app = TestApp::new().await;
    app.register_customer("A", "a@x.com", "p1").await;
    let before = app.store.all().unwrap();

    let (status, body) = app.register("Other", "a@x.com", "p2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "User already exists");
    assert_eq!(app.store.all().unwrap(), before);
}

#[tokio::test]
async fn test_register_admin_email_taken() {
    let app = TestApp::new().await;

    let (status, body) = app.register("Mallory", ADMIN_EMAIL, "x").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "User already exists");
}

#[tokio::test]
async fn test_register_email_is_case_sensitive() {
    let app = TestApp::new().await;
    app.register_customer("A", "a@x.com", "p1").await;

    let (status, _) = app.register("A2", "A@X.com", "p1").await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_concurrent_registrations_same_email() {
    let app = TestApp::new().await;

    let (first, second) = tokio::join!(
        app.register("A", "race@x.com", "p1"),
        app.register("B", "race@x.com", "p2"),
    );

    let created = [first.0, second.0]
        .iter()
        .filter(|s| **s == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1);
    assert_eq!(app.store.len().unwrap(), 2);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_register_invalid_json() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = app.send_request(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Invalid JSON body");
}
