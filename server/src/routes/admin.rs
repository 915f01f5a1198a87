//! Admin-only account management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::AccountSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreezeResponse {
    /// `"User frozen"` or `"User unfrozen"`.
    pub message: String,
    pub id: String,
    pub is_frozen: bool,
}

/// Handle `GET /api/admin/users`: every non-admin account, without
/// password hashes.
///
/// # Errors
///
/// Returns `403` if the caller is not an admin.
pub async fn list_users(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<AccountSummary>>, ApiError> {
    identity.require_admin()?;

    let accounts = state
        .store
        .all()?
        .iter()
        .filter(|u| !u.is_admin)
        .map(AccountSummary::from)
        .collect();

    Ok(Json(accounts))
}

/// Handle `PUT /api/admin/users/{id}/freeze`: flip the frozen flag.
///
/// # Errors
///
/// Returns `403` if the caller is not an admin and `404` for an unknown id.
pub async fn toggle_freeze(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<Json<FreezeResponse>, ApiError> {
    identity.require_admin()?;

    let user = state
        .store
        .toggle_frozen(&id)?
        .ok_or_else(ApiError::user_not_found)?;

    let state_word = if user.is_frozen { "frozen" } else { "unfrozen" };
    tracing::info!(admin = %identity.user_id, user_id = %user.id, "user {state_word}");

    Ok(Json(FreezeResponse {
        message: format!("User {state_word}"),
        id: user.id,
        is_frozen: user.is_frozen,
    }))
}
