//! Test the status endpoint, the fallback, and CORS headers.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_status_payload() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"], ADMIN_EMAIL);
    assert_eq!(body["note"], "Use /api/auth/login to get started");
    assert!(message(&body).contains("FinTrust"));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/nope", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "Route not found");
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_cors_allows_any_origin() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header(header::ORIGIN, "https://somewhere.example")
        .body(Body::empty())
        .unwrap();

    let response = app.respond(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_cors_preflight() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/auth/login")
        .header(header::ORIGIN, "https://somewhere.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.respond(request).await;

    assert!(response.status().is_success());
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS)
    );
}
