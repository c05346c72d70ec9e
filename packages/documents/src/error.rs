use letterhead_core::ValidationError;
use letterhead_storage::StorageError;
use thiserror::Error;

/// Service-level errors
#[derive(Error, Debug)]
pub enum DocumentsError {
    #[error("Storage error: {0}")]
    Storage(StorageError),
    #[error("Validation errors: {0:?}")]
    Validation(Vec<ValidationError>),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("A document with letter number '{0}' already exists")]
    Conflict(String),
    // Deliberately generic so denials never confirm a record exists
    #[error("Access denied")]
    Forbidden,
}

pub type DocumentsResult<T> = Result<T, DocumentsError>;

impl From<StorageError> for DocumentsError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateLetterNumber(number) => DocumentsError::Conflict(number),
            StorageError::DuplicateEmail(_) => {
                DocumentsError::validation("email", "Email is already in use")
            }
            StorageError::NotFound => DocumentsError::NotFound("Record"),
            other => DocumentsError::Storage(other),
        }
    }
}

impl DocumentsError {
    pub fn validation(field: &str, message: &str) -> Self {
        DocumentsError::Validation(vec![ValidationError::new(field, message)])
    }
}
