//! Test the admin account listing.

use axum::http::{Method, StatusCode};

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_non_admin_gets_403() {
    let app = TestApp::new().await;
    let (_, token) = app.register_customer("A", "a@x.com", "p1").await;

    let (status, body) = app
        .send(Method::GET, "/api/admin/users", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message(&body), "Admin access required");
}

#[tokio::test]
async fn test_empty_listing_excludes_admin() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app
        .send(Method::GET, "/api/admin/users", Some(&admin), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_listing_returns_customers_in_order() {
    let app = TestApp::new().await;
    let (first_id, _) = app.register_customer("A", "a@x.com", "p1").await;
    let (second_id, _) = app.register_customer("B", "b@x.com", "p2").await;
    let admin = app.admin_token().await;

    let (status, body) = app
        .send(Method::GET, "/api/admin/users", Some(&admin), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().expect("array body");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], first_id.as_str());
    assert_eq!(users[1]["id"], second_id.as_str());

    for user in users {
        assert_eq!(user["isAdmin"], false);
        assert_eq!(user["isFrozen"], false);
        assert_eq!(user["investments"], 0);
        assert_eq!(user["loans"], 0);
        assert!(user.get("password").is_none());
        assert!(user.get("passwordHash").is_none());
    }
}

#[tokio::test]
async fn test_listing_reflects_frozen_flag() {
    let app = TestApp::new().await;
    let (id, _) = app.register_customer("A", "a@x.com", "p1").await;
    let admin = app.admin_token().await;
    app.freeze(&admin, &id).await;

    let (_, body) = app
        .send(Method::GET, "/api/admin/users", Some(&admin), None)
        .await;

    assert_eq!(body[0]["isFrozen"], true);
}
