// ABOUTME: HTTP request handlers for category operations
// ABOUTME: Admin-gated mutations, soft delete via deactivation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use tracing::{error, info};

use letterhead_documents::{CategoryCreateInput, CategoryUpdateInput, DbState};

use crate::auth::CurrentActor;
use crate::response::{ApiError, ApiResponse};

/// List categories (active only for staff, all for admins)
pub async fn list_categories(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
) -> impl IntoResponse {
    match db.catalog.list_categories(&actor).await {
        Ok(categories) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(categories)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list categories: {}", e);
            ApiError(e).into_response()
        }
    }
}

/// Get a category by ID
pub async fn get_category(
    State(db): State<DbState>,
    CurrentActor(_actor): CurrentActor,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match db.catalog.get_category(&id).await {
        Ok(category) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(category)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to get category {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}

/// Create a new category
pub async fn create_category(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ResponseJson(input): ResponseJson<CategoryCreateInput>,
) -> impl IntoResponse {
    info!("Creating category: {}", input.name);

    match db.catalog.create_category(&actor, input).await {
        Ok(category) => (
            StatusCode::CREATED,
            ResponseJson(ApiResponse::success(category)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create category: {}", e);
            ApiError(e).into_response()
        }
    }
}

/// Update an existing category
pub async fn update_category(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    ResponseJson(updates): ResponseJson<CategoryUpdateInput>,
) -> impl IntoResponse {
    info!("Updating category: {}", id);

    match db.catalog.update_category(&actor, &id, updates).await {
        Ok(category) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(category)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update category {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}

/// Deactivate a category (soft delete)
pub async fn delete_category(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Deactivating category: {}", id);

    match db.catalog.deactivate_category(&actor, &id).await {
        Ok(()) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(serde_json::json!({
                "message": "Category deactivated successfully"
            }))),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to deactivate category {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}

/// List the active letter types belonging to a category
pub async fn list_category_letter_types(
    State(db): State<DbState>,
    CurrentActor(_actor): CurrentActor,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match db.catalog.list_letter_types_by_category(&id).await {
        Ok(letter_types) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(letter_types)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list letter types for category {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}
