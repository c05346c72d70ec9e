//! # Letterhead Core
//!
//! Domain types, validation, and identifier generation for the Letterhead
//! document lifecycle service.

pub mod constants;
pub mod identifier;
pub mod types;
pub mod validator;

pub use identifier::{
    generate_letter_number, generate_reference_number, MAX_GENERATION_ATTEMPTS,
};
pub use types::{
    format_issue_date, Actor, Category, CategoryCreateInput, CategoryUpdateInput, Document,
    DocumentCreateInput, DocumentFilter, DocumentStatus, DocumentSummary, DocumentUpdateInput,
    LetterType, LetterTypeCreateInput, LetterTypeUpdateInput, Role, User, UserCreateInput,
};
pub use validator::{
    validate_category_create, validate_category_update, validate_document_create,
    validate_document_update, validate_letter_type_create, validate_letter_type_update,
    validate_rejection_reason, ValidationError,
};

/// Generate a unique record ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
