//! `GET /api/users/profile`.

use axum::{Json, extract::State};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::ProfileView;

/// Return the caller's own profile.
///
/// # Errors
///
/// Returns `404` if the token's user id no longer resolves to a record.
pub async fn profile(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<ProfileView>, ApiError> {
    let user = state
        .store
        .find_by_id(&identity.user_id)?
        .ok_or_else(ApiError::user_not_found)?;

    Ok(Json(ProfileView::from(&user)))
}
