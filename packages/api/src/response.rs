// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides consistent response format across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use serde::Serialize;

use letterhead_documents::DocumentsError;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Service error carried across the HTTP boundary
pub struct ApiError(pub DocumentsError);

impl From<DocumentsError> for ApiError {
    fn from(err: DocumentsError) -> Self {
        ApiError(err)
    }
}

/// Convert service errors to HTTP responses
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self.0 {
            DocumentsError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            DocumentsError::Conflict(_) => (StatusCode::CONFLICT, self.0.to_string()),
            DocumentsError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            // Same body for every denial; nothing about the target leaks
            DocumentsError::Forbidden => (StatusCode::FORBIDDEN, self.0.to_string()),
            DocumentsError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
            ),
        };

        (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
    }
}
