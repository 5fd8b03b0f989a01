//! Admin login handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{LoginRequest, validate_request};
use crate::dto::response::{ApiResponse, LoginResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    validate_request(&req)?;

    let token = state.authenticator.login(&req.username, &req.password)?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: token.access_token,
        token_type: token.token_type,
        expires_at: token.expires_at,
    })))
}
