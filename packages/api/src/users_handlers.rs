// ABOUTME: HTTP request handlers for user administration
// ABOUTME: Admin-only account management; credentials live upstream

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use tracing::{error, info};

use letterhead_documents::DbState;
use letterhead_core::UserCreateInput;

use crate::auth::CurrentActor;
use crate::response::{ApiError, ApiResponse};

/// List all users
pub async fn list_users(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
) -> impl IntoResponse {
    match db.users.list_users(&actor).await {
        Ok(users) => (StatusCode::OK, ResponseJson(ApiResponse::success(users))).into_response(),
        Err(e) => {
            error!("Failed to list users: {}", e);
            ApiError(e).into_response()
        }
    }
}

/// Get a user by ID
pub async fn get_user(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match db.users.get_user(&actor, &id).await {
        Ok(user) => (StatusCode::OK, ResponseJson(ApiResponse::success(user))).into_response(),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}

/// Create a new user account
pub async fn create_user(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ResponseJson(input): ResponseJson<UserCreateInput>,
) -> impl IntoResponse {
    info!("Creating user: {}", input.email);

    match db.users.create_user(&actor, input).await {
        Ok(user) => {
            (StatusCode::CREATED, ResponseJson(ApiResponse::success(user))).into_response()
        }
        Err(e) => {
            error!("Failed to create user: {}", e);
            ApiError(e).into_response()
        }
    }
}

/// Delete a user account
pub async fn delete_user(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting user: {}", id);

    match db.users.delete_user(&actor, &id).await {
        Ok(()) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(serde_json::json!({
                "message": "User deleted successfully"
            }))),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}
