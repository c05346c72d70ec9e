// ABOUTME: Public verification endpoints
// ABOUTME: Unauthenticated, read-only lookups by letter/reference identifiers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use serde::Deserialize;
use tracing::{error, info};

use letterhead_documents::{DbState, VerificationRequest};

use crate::response::{ApiError, ApiResponse};

/// Query parameters for the single-field variant. Letter numbers contain
/// slashes, so they travel as a query parameter rather than a path segment.
#[derive(Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "letterNumber")]
    pub letter_number: String,
}

/// Verify a document by letter number alone
pub async fn verify_by_letter_number(
    State(db): State<DbState>,
    Query(query): Query<VerifyQuery>,
) -> impl IntoResponse {
    info!("Public verification for letter number");

    match db.documents.verify_letter_number(&query.letter_number).await {
        Ok(outcome) => (StatusCode::OK, ResponseJson(ApiResponse::success(outcome))).into_response(),
        Err(e) => {
            error!("Verification lookup failed: {}", e);
            ApiError(e).into_response()
        }
    }
}

/// Verify a document by letter number, reference number, and issue date
pub async fn verify_details(
    State(db): State<DbState>,
    ResponseJson(request): ResponseJson<VerificationRequest>,
) -> impl IntoResponse {
    info!("Public verification with full details");

    match db.documents.verify_details(&request).await {
        Ok(outcome) => (StatusCode::OK, ResponseJson(ApiResponse::success(outcome))).into_response(),
        Err(e) => {
            error!("Verification lookup failed: {}", e);
            ApiError(e).into_response()
        }
    }
}
