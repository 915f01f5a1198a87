//! `POST /api/auth/register` and `POST /api/auth/login`.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::{json_body, present};
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::User;

/// Request body for `POST /api/auth/register`.
///
/// Fields are optional so that a missing field yields our own 400 rather than
/// a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub token: String,
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid credentials".to_string())
}

/// Handle `POST /api/auth/register`.
///
/// # Errors
///
/// Returns `400` if a field is missing or the email is taken.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let body = json_body(payload)?;
    let (Some(name), Some(email), Some(password)) = (
        present(body.name),
        present(body.email),
        present(body.password),
    ) else {
        return Err(ApiError::Validation(
            "Name, email, and password required".to_string(),
        ));
    };

    // Cheap rejection before paying for a hash; `insert` re-checks atomically.
    if state.store.find_by_email(&email)?.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = state.passwords.hash(password).await?;
    let user = User::new_customer(name, email, password_hash);
    state.store.insert(user.clone())?;

    let token = state.tokens.issue(&user.id, false)?;
    tracing::info!(id = %user.id, email = %user.email, "registered user");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }),
    ))
}

/// Handle `POST /api/auth/login`.
///
/// # Errors
///
/// Returns `400` if a field is missing, `401` for an unknown email or wrong
/// password, and `403` if the account is frozen.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let body = json_body(payload)?;
    let (Some(email), Some(password)) = (present(body.email), present(body.password)) else {
        return Err(ApiError::Validation(
            "Email and password required".to_string(),
        ));
    };

    let Some(user) = state.store.find_by_email(&email)? else {
        tracing::info!(%email, "login rejected: unknown email");
        return Err(invalid_credentials());
    };

    if !state
        .passwords
        .verify(password, user.password_hash.clone())
        .await?
    {
        tracing::info!(id = %user.id, "login rejected: wrong password");
        return Err(invalid_credentials());
    }

    if user.is_frozen {
        tracing::info!(id = %user.id, "login rejected: account frozen");
        return Err(ApiError::Forbidden(
            "Account frozen. Contact admin.".to_string(),
        ));
    }

    let token = state.tokens.issue(&user.id, user.is_admin)?;
    tracing::info!(id = %user.id, is_admin = user.is_admin, "login succeeded");

    Ok(Json(LoginResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        is_admin: user.is_admin,
        token,
    }))
}
