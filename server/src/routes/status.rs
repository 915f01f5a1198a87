//! `GET /` status payload.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    /// Email of the seeded admin account.
    pub admin: String,
    pub note: &'static str,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "FinTrust Investment Platform is live",
        admin: state.admin_email.to_string(),
        note: "Use /api/auth/login to get started",
    })
}
