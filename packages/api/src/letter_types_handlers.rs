// ABOUTME: HTTP request handlers for letter type operations
// ABOUTME: Admin-gated mutations, soft delete via deactivation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use tracing::{error, info};

use letterhead_documents::{DbState, LetterTypeCreateInput, LetterTypeUpdateInput};

use crate::auth::CurrentActor;
use crate::response::{ApiError, ApiResponse};

/// List active letter types
pub async fn list_letter_types(
    State(db): State<DbState>,
    CurrentActor(_actor): CurrentActor,
) -> impl IntoResponse {
    match db.catalog.list_letter_types().await {
        Ok(letter_types) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(letter_types)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list letter types: {}", e);
            ApiError(e).into_response()
        }
    }
}

/// Get a letter type by ID
pub async fn get_letter_type(
    State(db): State<DbState>,
    CurrentActor(_actor): CurrentActor,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match db.catalog.get_letter_type(&id).await {
        Ok(letter_type) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(letter_type)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to get letter type {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}

/// Create a new letter type
pub async fn create_letter_type(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ResponseJson(input): ResponseJson<LetterTypeCreateInput>,
) -> impl IntoResponse {
    info!("Creating letter type: {}", input.name);

    match db.catalog.create_letter_type(&actor, input).await {
        Ok(letter_type) => (
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(letter_type)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create letter type: {}", e);
            ApiError(e).into_response()
        }
    }
}

/// Update an existing letter type
pub async fn update_letter_type(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    ResponseJson(updates): ResponseJson<LetterTypeUpdateInput>,
) -> impl IntoResponse {
    info!("Updating letter type: {}", id);

    match db.catalog.update_letter_type(&actor, &id, updates).await {
        Ok(letter_type) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(letter_type)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update letter type {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}

/// Deactivate a letter type (soft delete)
pub async fn delete_letter_type(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Deactivating letter type: {}", id);

    match db.catalog.deactivate_letter_type(&actor, &id).await {
        Ok(()) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(serde_json::json!({
                "message": "Letter type deactivated successfully"
            }))),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to deactivate letter type {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}
