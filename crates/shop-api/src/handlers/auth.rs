//! Auth handlers: login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use crate::dto::request::{LoginRequest, validated};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, bearer_token};
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let req = validated(req)?;
    let result = state.session_manager.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: result.token,
        expires_at: result.expires_at,
    })))
}

/// POST /auth/logout
///
/// Accepts any well-signed token, including one that is already expired,
/// revoked or superseded.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.session_manager.logout(bearer_token(&headers)).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Successfully logged out",
    ))))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.account_service.get_profile(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
