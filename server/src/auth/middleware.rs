//! Bearer-token authentication for protected routes.
//!
//! `require_bearer` runs in front of every protected route. It distinguishes
//! a request that carries no token (401) from one whose token fails
//! verification (403). On success the verified [`Identity`] is stored in the
//! request extensions, where handlers pick it up as an extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// The caller proven by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub is_admin: bool,
}

impl Identity {
    /// Fail with `Forbidden` unless the token carried the admin flag.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(ApiError::admin_required())
        }
    }
}

/// Extract the raw token from an `Authorization: Bearer <token>` header value.
#[must_use]
pub fn extract_bearer(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

/// Middleware that requires a valid bearer token.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer)
        .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("rejected bearer token: {e}");
        ApiError::Forbidden("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(Identity {
        user_id: claims.sub,
        is_admin: claims.is_admin,
    });

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_bearer_token_valid() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn extract_bearer_token_missing_prefix() {
        assert_eq!(extract_bearer("abc.def.ghi"), None);
        assert_eq!(extract_bearer("Basic dXNlcjpwYXNz"), None);
    }

    #[test]
    fn extract_bearer_token_empty() {
        assert_eq!(extract_bearer("Bearer "), None);
        assert_eq!(extract_bearer("Bearer    "), None);
    }

    #[test]
    fn require_admin_checks_flag() {
        let admin = Identity {
            user_id: "admin-001".into(),
            is_admin: true,
        };
        let customer = Identity {
            user_id: "user-1".into(),
            is_admin: false,
        };

        assert!(admin.require_admin().is_ok());
        assert_eq!(customer.require_admin(), Err(ApiError::admin_required()));
    }
}
