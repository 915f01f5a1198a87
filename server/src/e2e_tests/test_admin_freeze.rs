//! Test the admin freeze toggle.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::e2e_tests::helpers::*;
use crate::store::UserStore;

#[tokio::test]
async fn test_non_admin_gets_403_even_for_self() {
    let app = TestApp::new().await;
    let (id, token) = app.register_customer("A", "a@x.com", "p1").await;

    let (status, body) = app.freeze(&token, &id).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message(&body), "Admin access required");
    assert!(!app.store.find_by_id(&id).unwrap().unwrap().is_frozen);
}

#[tokio::test]
async fn test_non_admin_403_precedes_404() {
    let app = TestApp::new().await;
    let (_, token) = app.register_customer("A", "a@x.com", "p1").await;

    let (status, _) = app.freeze(&token, "user-unknown").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_id_is_404() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app.freeze(&admin, "user-unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "User not found");
}

#[tokio::test]
async fn test_freeze_twice_restores_state() {
    let app = TestApp::new().await;
    let (id, _) = app.register_customer("A", "a@x.com", "p1").await;
    let admin = app.admin_token().await;

    let (status, body) = app.freeze(&admin, &id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "User frozen", "id": id, "isFrozen": true })
    );

    let (status, body) = app.freeze(&admin, &id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "User unfrozen", "id": id, "isFrozen": false })
    );

    let (status, _) = app.login("a@x.com", "p1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_freeze_only_touches_target() {
    let app = TestApp::new().await;
    let (target, _) = app.register_customer("A", "a@x.com", "p1").await;
    let (bystander, _) = app.register_customer("B", "b@x.com", "p2").await;
    let admin = app.admin_token().await;

    app.freeze(&admin, &target).await;

    assert!(app.store.find_by_id(&target).unwrap().unwrap().is_frozen);
    assert!(!app.store.find_by_id(&bystander).unwrap().unwrap().is_frozen);
}

/// Register, fail a login, get frozen, then fail again with 403.
#[tokio::test]
async fn test_register_freeze_login_flow() {
    let app = TestApp::new().await;

    let (status, body) = app.register("A", "a@x.com", "p1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(!string_field(&body, "token").is_empty());
    let id = string_field(&body, "id");

    let (status, body) = app.login("a@x.com", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid credentials" }));

    let admin = app.admin_token().await;
    let (status, body) = app.freeze(&admin, &id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isFrozen"], true);

    let (status, body) = app.login("a@x.com", "p1").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "message": "Account frozen. Contact admin." }));
}

#[tokio::test]
async fn test_frozen_user_keeps_existing_token() {
    let app = TestApp::new().await;
    let (id, token) = app.register_customer("A", "a@x.com", "p1").await;
    let admin = app.admin_token().await;
    app.freeze(&admin, &id).await;

    let (status, _) = app
        .send(Method::GET, "/api/users/profile", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
}
