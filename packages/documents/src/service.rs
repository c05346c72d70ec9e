// ABOUTME: Document service layer coordinating validation, policy and storage
// ABOUTME: Owns identifier generation retries and the status workflow

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use letterhead_core::{
    generate_letter_number, generate_reference_number, validate_document_create,
    validate_document_update, Actor, Category, Document, DocumentCreateInput, DocumentFilter,
    DocumentStatus, DocumentUpdateInput, MAX_GENERATION_ATTEMPTS,
};
use letterhead_storage::{
    CategoryStorage, DocumentStorage, LetterTypeStorage, NewDocument, StorageError,
};

use crate::error::{DocumentsError, DocumentsResult};
use crate::policy::owner_scope;
use crate::workflow::plan_transition;

/// Document operations, with storage injected explicitly
pub struct DocumentsService {
    documents: Arc<DocumentStorage>,
    categories: Arc<CategoryStorage>,
    letter_types: Arc<LetterTypeStorage>,
}

impl DocumentsService {
    pub fn new(
        documents: Arc<DocumentStorage>,
        categories: Arc<CategoryStorage>,
        letter_types: Arc<LetterTypeStorage>,
    ) -> Self {
        Self {
            documents,
            categories,
            letter_types,
        }
    }

    pub(crate) fn document_storage(&self) -> &DocumentStorage {
        &self.documents
    }

    /// Resolve the category and check the letter type belongs to it
    async fn resolve_references(
        &self,
        category_id: &str,
        letter_type_id: &str,
    ) -> DocumentsResult<Category> {
        let category = self
            .categories
            .get(category_id)
            .await?
            .ok_or(DocumentsError::NotFound("Category"))?;
        if !category.is_active {
            return Err(DocumentsError::validation(
                "categoryId",
                "Category is no longer active",
            ));
        }

        let letter_type = self
            .letter_types
            .get(letter_type_id)
            .await?
            .ok_or(DocumentsError::NotFound("Letter type"))?;
        if !letter_type.is_active {
            return Err(DocumentsError::validation(
                "letterTypeId",
                "Letter type is no longer active",
            ));
        }
        if letter_type.category_id != category.id {
            return Err(DocumentsError::validation(
                "letterTypeId",
                "Letter type does not belong to the selected category",
            ));
        }

        Ok(category)
    }

    /// Creates a new document.
    ///
    /// When the caller does not supply a letter number one is generated from
    /// the category prefix and regenerated on collision, bounded by
    /// `MAX_GENERATION_ATTEMPTS`. A caller-supplied number is tried exactly
    /// once; its collision is the caller's to resolve.
    pub async fn create_document(
        &self,
        actor: &Actor,
        input: DocumentCreateInput,
    ) -> DocumentsResult<Document> {
        let validation_errors = validate_document_create(&input);
        if !validation_errors.is_empty() {
            return Err(DocumentsError::Validation(validation_errors));
        }

        let category = self
            .resolve_references(&input.category_id, &input.letter_type_id)
            .await?;

        let today = Utc::now().date_naive();
        let status = input.status.unwrap_or(DocumentStatus::Draft);
        let reference_number = input
            .reference_number
            .clone()
            .unwrap_or_else(|| generate_reference_number(&category.prefix, today));

        let mut attempt = 0;
        loop {
            let letter_number = match &input.letter_number {
                Some(number) => number.clone(),
                None => generate_letter_number(&category.prefix, today),
            };

            let record = NewDocument {
                title: input.title.clone(),
                category_id: input.category_id.clone(),
                letter_type_id: input.letter_type_id.clone(),
                letter_number,
                reference_number: reference_number.clone(),
                issue_date: input.issue_date,
                content: input.content.clone(),
                status,
                created_by: actor.id.clone(),
            };

            match self.documents.create(record).await {
                Ok(document) => {
                    info!(
                        "Created document '{}' with ID {}",
                        document.letter_number, document.id
                    );
                    return Ok(document);
                }
                Err(StorageError::DuplicateLetterNumber(number)) => {
                    attempt += 1;
                    if input.letter_number.is_some() || attempt >= MAX_GENERATION_ATTEMPTS {
                        return Err(DocumentsError::Conflict(number));
                    }
                    warn!(
                        "Letter number collision on '{}', regenerating (attempt {})",
                        number, attempt
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Gets a document visible to the actor
    pub async fn get_document(&self, actor: &Actor, id: &str) -> DocumentsResult<Document> {
        self.documents
            .get(id, owner_scope(actor).as_deref())
            .await?
            .ok_or(DocumentsError::NotFound("Document"))
    }

    /// Lists documents, intersecting the actor's ownership scope with the
    /// requested filter
    pub async fn list_documents(
        &self,
        actor: &Actor,
        mut filter: DocumentFilter,
    ) -> DocumentsResult<Vec<Document>> {
        if let Some(owner) = owner_scope(actor) {
            filter.created_by = Some(owner);
        }

        let documents = self.documents.list(&filter).await?;
        debug!("Retrieved {} documents", documents.len());
        Ok(documents)
    }

    /// Updates the non-workflow fields of a document the actor owns (or any
    /// document, for administrators)
    pub async fn update_document(
        &self,
        actor: &Actor,
        id: &str,
        input: DocumentUpdateInput,
    ) -> DocumentsResult<Document> {
        let validation_errors = validate_document_update(&input);
        if !validation_errors.is_empty() {
            return Err(DocumentsError::Validation(validation_errors));
        }

        let scope = owner_scope(actor);
        let current = self
            .documents
            .get(id, scope.as_deref())
            .await?
            .ok_or(DocumentsError::NotFound("Document"))?;

        // Nothing to write; skip the storage round trip
        if input.is_empty() {
            return Ok(current);
        }

        // Re-validate the category/letter-type pairing if either changes
        if input.category_id.is_some() || input.letter_type_id.is_some() {
            let category_id = input
                .category_id
                .as_deref()
                .unwrap_or(&current.category_id);
            let letter_type_id = input
                .letter_type_id
                .as_deref()
                .unwrap_or(&current.letter_type_id);
            self.resolve_references(category_id, letter_type_id).await?;
        }

        let document = self.documents.update(id, scope.as_deref(), &input).await?;
        info!("Updated document {} ({})", document.letter_number, id);
        Ok(document)
    }

    /// Deletes a document the actor owns (or any document, for
    /// administrators)
    pub async fn delete_document(&self, actor: &Actor, id: &str) -> DocumentsResult<()> {
        self.documents
            .delete(id, owner_scope(actor).as_deref())
            .await?;
        info!("Deleted document {}", id);
        Ok(())
    }

    /// Applies a status transition through the workflow rules
    pub async fn transition_status(
        &self,
        actor: &Actor,
        id: &str,
        target: DocumentStatus,
        rejection_reason: Option<&str>,
    ) -> DocumentsResult<Document> {
        // Staff resolve only their own documents here, so a foreign ID
        // surfaces as NotFound before any role check can leak existence
        let document = self
            .documents
            .get(id, owner_scope(actor).as_deref())
            .await?
            .ok_or(DocumentsError::NotFound("Document"))?;

        let change = plan_transition(&document, target, actor, rejection_reason, Utc::now())?;
        let updated = self.documents.apply_status(id, change).await?;

        info!(
            "Document {} moved from {} to {}",
            updated.letter_number, document.status, updated.status
        );
        Ok(updated)
    }
}
