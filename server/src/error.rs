//! HTTP-facing error type.
//!
//! Every failure a handler can produce maps to one `ApiError` variant, which
//! renders as a status code plus a JSON body `{"message": ...}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::auth::{PasswordError, TokenError};
use crate::store::StoreError;

/// Message returned to callers for any `Internal` error.
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A required field is missing or the body is not JSON.
    Validation(String),
    /// The resource already exists.
    Conflict(String),
    /// Bad credentials or no bearer token.
    Unauthorized(String),
    /// Frozen account, non-admin caller, or rejected token.
    Forbidden(String),
    NotFound(String),
    /// Carries the cause for logging; never sent to the caller.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the caller.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m)
            | Self::Conflict(m)
            | Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m) => m.as_str(),
            Self::Internal(_) => INTERNAL_MESSAGE,
        }
    }

    pub fn user_not_found() -> Self {
        Self::NotFound("User not found".to_string())
    }

    pub fn admin_required() -> Self {
        Self::Forbidden("Admin access required".to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal(cause) => write!(f, "internal error: {cause}"),
            other => write!(f, "{} {}", other.status().as_u16(), other.message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            tracing::error!("request failed: {cause}");
        }

        let body = Json(ErrorBody {
            message: self.message(),
        });
        (self.status(), body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateEmail(_) => Self::Conflict("User already exists".to_string()),
            StoreError::DuplicateId(_) | StoreError::LockPoisoned => {
                Self::Internal(error.to_string())
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        Self::Internal(error.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (ApiError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (ApiError::Conflict("c".into()), StatusCode::BAD_REQUEST),
            (ApiError::Unauthorized("u".into()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("f".into()), StatusCode::FORBIDDEN),
            (ApiError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (ApiError::Internal("i".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            let (status, _) = render(error).await;
            assert_eq!(status, expected);
        }
    }

    #[tokio::test]
    async fn test_body_carries_message() {
        let (_, body) = render(ApiError::Unauthorized("Invalid credentials".into())).await;
        assert_eq!(body, serde_json::json!({ "message": "Invalid credentials" }));
    }

    #[tokio::test]
    async fn test_internal_cause_is_hidden() {
        let (_, body) = render(ApiError::Internal("lock poisoned at 0xdead".into())).await;
        assert_eq!(body, serde_json::json!({ "message": "Internal server error" }));
    }

    #[test]
    fn test_store_error_conversion() {
        assert_eq!(
            ApiError::from(StoreError::DuplicateEmail("a@x.com".into())),
            ApiError::Conflict("User already exists".into())
        );
        assert!(matches!(
            ApiError::from(StoreError::LockPoisoned),
            ApiError::Internal(_)
        ));
    }
}
