//! Test credential exchange.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_registered_user_can_log_in() {
    let app = TestApp::new().await;
    let (id, _) = app.register_customer("A", "a@x.com", "p1").await;

    let (status, body) = app.login("a@x.com", "p1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["name"], "A");
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["isAdmin"], false);

    let claims = app
        .tokens
        .verify(&string_field(&body, "token"))
        .expect("valid token");
    assert_eq!(claims.sub, id);
    assert!(!claims.is_admin);
}

#[tokio::test]
async fn test_wrong_password_is_401() {
    let app = TestApp::new().await;
    app.register_customer("A", "a@x.com", "p1").await;

    let (status, body) = app.login("a@x.com", "wrong").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid credentials" }));
}

#[tokio::test]
async fn test_unknown_email_is_401() {
    let app = TestApp::new().await;

    let (status, body) = app.login("ghost@x.com", "p1").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message(&body), "Invalid credentials");
}

#[tokio::test]
async fn test_login_missing_fields_is_400() {
    let app = TestApp::new().await;

    for body in [json!({ "email": "a@x.com" }), json!({ "password": "p1" }), json!({})] {
        let (status, response) = app
            .send(Method::POST, "/api/auth/login", None, Some(body))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&response), "Email and password required");
    }
}

#[tokio::test]
async fn test_admin_login_carries_admin_flag() {
    let app = TestApp::new().await;

    let (status, body) = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "admin-001");
    assert_eq!(body["isAdmin"], true);
    assert!(
        app.tokens
            .verify(&string_field(&body, "token"))
            .expect("valid token")
            .is_admin
    );
}

#[tokio::test]
async fn test_frozen_account_is_403_not_401() {
    let app = TestApp::new().await;
    let (id, _) = app.register_customer("A", "a@x.com", "p1").await;
    let admin = app.admin_token().await;
    app.freeze(&admin, &id).await;

    let (right_status, right_body) = app.login("a@x.com", "p1").await;
    let (wrong_status, wrong_body) = app.login("a@x.com", "nope").await;

    assert_eq!(right_status, StatusCode::FORBIDDEN);
    assert_eq!(message(&right_body), "Account frozen. Contact admin.");
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(message(&wrong_body), "Invalid credentials");
}
