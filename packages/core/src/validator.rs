use crate::types::{
    CategoryCreateInput, CategoryUpdateInput, DocumentCreateInput, DocumentStatus,
    DocumentUpdateInput, LetterTypeCreateInput, LetterTypeUpdateInput,
};

/// Validation errors for request data
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validates document data for creation
pub fn validate_document_create(data: &DocumentCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.title.trim().is_empty() {
        errors.push(ValidationError::new("title", "Title is required"));
    }

    if data.category_id.trim().is_empty() {
        errors.push(ValidationError::new("categoryId", "Category is required"));
    }

    if data.letter_type_id.trim().is_empty() {
        errors.push(ValidationError::new(
            "letterTypeId",
            "Letter type is required",
        ));
    }

    if data.content.trim().is_empty() {
        errors.push(ValidationError::new("content", "Content is required"));
    }

    if let Some(ref letter_number) = data.letter_number {
        if letter_number.trim().is_empty() {
            errors.push(ValidationError::new(
                "letterNumber",
                "Letter number cannot be empty",
            ));
        }
    }

    if let Some(ref reference_number) = data.reference_number {
        if reference_number.trim().is_empty() {
            errors.push(ValidationError::new(
                "referenceNumber",
                "Reference number cannot be empty",
            ));
        }
    }

    if let Some(status) = data.status {
        if status.is_terminal() {
            errors.push(ValidationError::new(
                "status",
                "New documents may only be created as Draft or Pending",
            ));
        }
    }

    errors
}

/// Validates document update data
pub fn validate_document_update(data: &DocumentUpdateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(ref title) = data.title {
        if title.trim().is_empty() {
            errors.push(ValidationError::new("title", "Title cannot be empty"));
        }
    }

    if let Some(ref category_id) = data.category_id {
        if category_id.trim().is_empty() {
            errors.push(ValidationError::new(
                "categoryId",
                "Category cannot be empty",
            ));
        }
    }

    if let Some(ref letter_type_id) = data.letter_type_id {
        if letter_type_id.trim().is_empty() {
            errors.push(ValidationError::new(
                "letterTypeId",
                "Letter type cannot be empty",
            ));
        }
    }

    if let Some(ref letter_number) = data.letter_number {
        if letter_number.trim().is_empty() {
            errors.push(ValidationError::new(
                "letterNumber",
                "Letter number cannot be empty",
            ));
        }
    }

    if let Some(ref reference_number) = data.reference_number {
        if reference_number.trim().is_empty() {
            errors.push(ValidationError::new(
                "referenceNumber",
                "Reference number cannot be empty",
            ));
        }
    }

    if let Some(ref content) = data.content {
        if content.trim().is_empty() {
            errors.push(ValidationError::new("content", "Content cannot be empty"));
        }
    }

    errors
}

/// Validates a rejection reason supplied with a Pending → Rejected transition
pub fn validate_rejection_reason(reason: Option<&str>) -> Vec<ValidationError> {
    match reason {
        Some(r) if !r.trim().is_empty() => Vec::new(),
        _ => vec![ValidationError::new(
            "rejectionReason",
            "A rejection reason is required",
        )],
    }
}

/// Validates category data for creation
pub fn validate_category_create(data: &CategoryCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Category name is required"));
    }

    if data.prefix.trim().is_empty() {
        errors.push(ValidationError::new("prefix", "Prefix is required"));
    } else if !data
        .prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        errors.push(ValidationError::new(
            "prefix",
            "Prefix may only contain letters, digits and hyphens",
        ));
    }

    errors
}

/// Validates category update data
pub fn validate_category_update(data: &CategoryUpdateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(ref name) = data.name {
        if name.trim().is_empty() {
            errors.push(ValidationError::new("name", "Category name cannot be empty"));
        }
    }

    if let Some(ref prefix) = data.prefix {
        if prefix.trim().is_empty() {
            errors.push(ValidationError::new("prefix", "Prefix cannot be empty"));
        } else if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            errors.push(ValidationError::new(
                "prefix",
                "Prefix may only contain letters, digits and hyphens",
            ));
        }
    }

    errors
}

/// Validates letter type data for creation
pub fn validate_letter_type_create(data: &LetterTypeCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Letter type name is required"));
    }

    if data.category_id.trim().is_empty() {
        errors.push(ValidationError::new("categoryId", "Category is required"));
    }

    errors
}

/// Validates letter type update data
pub fn validate_letter_type_update(data: &LetterTypeUpdateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(ref name) = data.name {
        if name.trim().is_empty() {
            errors.push(ValidationError::new(
                "name",
                "Letter type name cannot be empty",
            ));
        }
    }

    errors
}
