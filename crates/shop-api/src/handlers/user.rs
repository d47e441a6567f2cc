//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::dto::request::{CreateUserRequest, UpdateUserRequest, UserListParams, validated};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_uuid};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    let users = state.account_service.list_users(&params.into()).await?;
    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let req = validated(req)?;
    let user = state.account_service.create_user(req.into()).await?;
    tracing::info!(admin_id = %auth.user_id, user_id = %user.id, "Admin created user");
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    let req = validated(req)?;
    state.account_service.update_name(id, req.name.trim()).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User name updated successfully",
    ))))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    state.account_service.remove_user(id).await?;
    tracing::info!(admin_id = %auth.user_id, user_id = %id, "Admin deleted user");
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User deleted successfully",
    ))))
}
