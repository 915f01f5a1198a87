//! Test bearer-token handling on protected routes.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use jsonwebtoken::get_current_timestamp;

use crate::auth::{TOKEN_LIFETIME_SECS, TokenService};
use crate::e2e_tests::helpers::*;

const PROTECTED: [(&str, &str); 3] = [
    ("GET", "/api/users/profile"),
    ("GET", "/api/admin/users"),
    ("PUT", "/api/admin/users/admin-001/freeze"),
];

fn request(method: &str, uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let app = TestApp::new().await;

    for (method, uri) in PROTECTED {
        let (status, body) = app.send_request(request(method, uri, None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(message(&body), "Access token required");
    }
}

#[tokio::test]
async fn test_non_bearer_scheme_is_401() {
    let app = TestApp::new().await;

    for header_value in ["Basic dXNlcjpwYXNz", "Bearer ", "token-without-scheme"] {
        let (status, _) = app
            .send_request(request("GET", "/api/users/profile", Some(header_value)))
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {header_value:?}");
    }
}

#[tokio::test]
async fn test_garbage_token_is_403() {
    let app = TestApp::new().await;

    for (method, uri) in PROTECTED {
        let (status, body) = app
            .send_request(request(method, uri, Some("Bearer not.a.jwt")))
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(message(&body), "Invalid or expired token");
    }
}

#[tokio::test]
async fn test_expired_token_is_403() {
    let app = TestApp::new().await;
    let (id, _) = app.register_customer("A", "a@x.com", "p1").await;
    let issued_at = get_current_timestamp() - TOKEN_LIFETIME_SECS - 3600;
    let expired = app.tokens.issue_at(&id, false, issued_at).unwrap();

    let (status, _) = app
        .send(Method::GET, "/api/users/profile", Some(&expired), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_from_other_secret_is_403() {
    let app = TestApp::new().await;
    let forger = TokenService::new(b"some-other-secret-entirely").unwrap();
    let forged = forger.issue("admin-001", true).unwrap();

    let (status, _) = app
        .send(Method::GET, "/api/admin/users", Some(&forged), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_public_routes_ignore_bad_token() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send_request(request("GET", "/", Some("Bearer not.a.jwt")))
        .await;

    assert_eq!(status, StatusCode::OK);
}
