//! # Letterhead Documents
//!
//! Service layer for the document lifecycle: creation with identifier
//! generation, the Draft → Pending → Approved/Rejected workflow, ownership
//! policy, public verification, and bulk import.

pub mod catalog;
pub mod db;
pub mod error;
pub mod import;
pub mod policy;
pub mod service;
pub mod users;
pub mod verification;
pub mod workflow;

pub use catalog::CatalogService;
pub use db::DbState;
pub use error::{DocumentsError, DocumentsResult};
pub use import::{ImportRow, ImportRowError, ImportSummary};
pub use service::DocumentsService;
pub use users::UsersService;
pub use verification::{VerificationOutcome, VerificationRequest};
pub use workflow::plan_transition;

// Re-export main types from core
pub use letterhead_core::{
    Actor, Category, CategoryCreateInput, CategoryUpdateInput, Document, DocumentCreateInput,
    DocumentFilter, DocumentStatus, DocumentSummary, DocumentUpdateInput, LetterType,
    LetterTypeCreateInput, LetterTypeUpdateInput, Role, User, UserCreateInput, ValidationError,
};
