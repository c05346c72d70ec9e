// ABOUTME: HTTP request handlers for document operations
// ABOUTME: CRUD, status transitions, and bulk import

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use serde::Deserialize;
use tracing::{error, info};

use letterhead_documents::{
    DbState, DocumentCreateInput, DocumentFilter, DocumentStatus, DocumentUpdateInput, ImportRow,
};

use crate::auth::CurrentActor;
use crate::response::{ApiError, ApiResponse};

/// Query parameters for listing documents
#[derive(Deserialize)]
pub struct ListDocumentsQuery {
    pub status: Option<DocumentStatus>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Request body for status transitions
#[derive(Deserialize)]
pub struct TransitionRequest {
    pub status: DocumentStatus,
    #[serde(rename = "rejectionReason")]
    pub rejection_reason: Option<String>,
}

/// List documents visible to the actor
pub async fn list_documents(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<ListDocumentsQuery>,
) -> impl IntoResponse {
    info!("Listing documents for actor {}", actor.id);

    let filter = DocumentFilter {
        status: query.status,
        category_id: query.category_id,
        created_by: None,
        limit: query.limit,
        offset: query.offset,
    };

    match db.documents.list_documents(&actor, filter).await {
        Ok(documents) => {
            info!("Retrieved {} documents", documents.len());
            (
                StatusCode::OK,
                ResponseJson(ApiResponse::success(documents)),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to list documents: {}", e);
            ApiError(e).into_response()
        }
    }
}

/// Get a specific document by ID
pub async fn get_document(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Getting document with ID: {}", id);

    match db.documents.get_document(&actor, &id).await {
        Ok(document) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(document)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to get document {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}

/// Create a new document
pub async fn create_document(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ResponseJson(input): ResponseJson<DocumentCreateInput>,
) -> impl IntoResponse {
    info!("Creating document: {}", input.title);

    match db.documents.create_document(&actor, input).await {
        Ok(document) => {
            info!(
                "Created document: {} (ID: {})",
                document.letter_number, document.id
            );
            (
                StatusCode::CREATED,
                ResponseJson(ApiResponse::success(document)),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to create document: {}", e);
            ApiError(e).into_response()
        }
    }
}

/// Update an existing document (non-workflow fields only)
pub async fn update_document(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    ResponseJson(updates): ResponseJson<DocumentUpdateInput>,
) -> impl IntoResponse {
    info!("Updating document: {}", id);

    match db.documents.update_document(&actor, &id, updates).await {
        Ok(document) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(document)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update document {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}

/// Delete a document
pub async fn delete_document(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting document: {}", id);

    match db.documents.delete_document(&actor, &id).await {
        Ok(()) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(serde_json::json!({
                "message": "Document deleted successfully"
            }))),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete document {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}

/// Move a document through the status workflow
pub async fn transition_status(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    ResponseJson(request): ResponseJson<TransitionRequest>,
) -> impl IntoResponse {
    info!("Transitioning document {} to {}", id, request.status);

    match db
        .documents
        .transition_status(
            &actor,
            &id,
            request.status,
            request.rejection_reason.as_deref(),
        )
        .await
    {
        Ok(document) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(document)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to transition document {}: {}", id, e);
            ApiError(e).into_response()
        }
    }
}

/// Bulk import documents from pre-parsed spreadsheet rows
pub async fn import_documents(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ResponseJson(rows): ResponseJson<Vec<ImportRow>>,
) -> impl IntoResponse {
    info!("Importing {} document rows", rows.len());

    match db.documents.import_documents(&actor, rows).await {
        Ok(summary) => {
            info!(
                "Import finished: {} created, {} skipped",
                summary.created, summary.skipped
            );
            (StatusCode::OK, ResponseJson(ApiResponse::success(summary))).into_response()
        }
        Err(e) => {
            error!("Failed to import documents: {}", e);
            ApiError(e).into_response()
        }
    }
}
