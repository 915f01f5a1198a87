//! HTTP route table.
//!
//! ```text
//! GET  /                              status payload
//! POST /api/auth/register             create a customer account
//! POST /api/auth/login                exchange credentials for a token
//! GET  /api/users/profile             bearer
//! GET  /api/admin/users               bearer + admin
//! PUT  /api/admin/users/{id}/freeze   bearer + admin
//! ```

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::{Method, header},
    middleware,
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::require_bearer;
use crate::error::ApiError;
use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod status;
pub mod users;

/// Build the application router.
#[allow(clippy::disallowed_methods)] // AppState::clone only bumps Arc counts
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    // route_layer so unknown paths still fall through to 404 instead of 401
    let protected_routes = Router::new()
        .route("/users/profile", get(users::profile))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/{id}/freeze", put(admin::toggle_freeze))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/", get(status::status))
        .nest("/api", public_routes.merge(protected_routes))
        .fallback(not_found)
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Any origin may call the API.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// Unwrap a JSON body, turning any rejection into a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("rejected request body: {rejection}");
        ApiError::Validation("Invalid JSON body".to_string())
    })
}

/// Treat absent and empty strings alike.
pub(crate) fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(Some("a".into())), Some("a".to_string()));
    }
}
