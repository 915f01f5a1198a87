//! Test the caller's own profile.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_profile_returns_own_record() {
    let app = TestApp::new().await;
    let (id, token) = app.register_customer("A", "a@x.com", "p1").await;

    let (status, body) = app
        .send(Method::GET, "/api/users/profile", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": id,
            "name": "A",
            "email": "a@x.com",
            "investments": 0,
            "loans": 0,
        })
    );
}

#[tokio::test]
async fn test_token_never_resolves_to_other_user() {
    let app = TestApp::new().await;
    let (alice_id, alice_token) = app.register_customer("Alice", "alice@x.com", "pa").await;
    let (bob_id, bob_token) = app.register_customer("Bob", "bob@x.com", "pb").await;

    let (_, alice) = app
        .send(Method::GET, "/api/users/profile", Some(&alice_token), None)
        .await;
    let (_, bob) = app
        .send(Method::GET, "/api/users/profile", Some(&bob_token), None)
        .await;

    assert_eq!(alice["id"], alice_id.as_str());
    assert_eq!(bob["id"], bob_id.as_str());
    assert_ne!(alice["id"], bob["id"]);
}

#[tokio::test]
async fn test_profile_for_vanished_user_is_404() {
    let app = TestApp::new().await;
    let token = app.tokens.issue("user-0-deadbeef", false).unwrap();

    let (status, body) = app
        .send(Method::GET, "/api/users/profile", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "User not found");
}

#[tokio::test]
async fn test_profile_never_exposes_password_hash() {
    let app = TestApp::new().await;
    let (_, token) = app.register_customer("A", "a@x.com", "p1").await;

    let (_, body) = app
        .send(Method::GET, "/api/users/profile", Some(&token), None)
        .await;

    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}
