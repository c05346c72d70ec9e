// ABOUTME: Category and letter type services
// ABOUTME: Admin-gated mutations, soft-delete, active-only selection lists

use std::sync::Arc;

use tracing::info;

use letterhead_core::{
    validate_category_create, validate_category_update, validate_letter_type_create,
    validate_letter_type_update, Actor, Category, CategoryCreateInput, CategoryUpdateInput,
    LetterType, LetterTypeCreateInput, LetterTypeUpdateInput,
};
use letterhead_storage::{CategoryStorage, LetterTypeStorage};

use crate::error::{DocumentsError, DocumentsResult};
use crate::policy::ensure_admin;

/// Reference-data operations: categories and the letter types within them
pub struct CatalogService {
    categories: Arc<CategoryStorage>,
    letter_types: Arc<LetterTypeStorage>,
}

impl CatalogService {
    pub fn new(categories: Arc<CategoryStorage>, letter_types: Arc<LetterTypeStorage>) -> Self {
        Self {
            categories,
            letter_types,
        }
    }

    pub async fn create_category(
        &self,
        actor: &Actor,
        input: CategoryCreateInput,
    ) -> DocumentsResult<Category> {
        ensure_admin(actor)?;

        let validation_errors = validate_category_create(&input);
        if !validation_errors.is_empty() {
            return Err(DocumentsError::Validation(validation_errors));
        }

        let category = self.categories.create(input).await?;
        info!("Created category '{}' ({})", category.name, category.id);
        Ok(category)
    }

    pub async fn get_category(&self, id: &str) -> DocumentsResult<Category> {
        self.categories
            .get(id)
            .await?
            .ok_or(DocumentsError::NotFound("Category"))
    }

    /// Admins see everything; staff get the active selection list
    pub async fn list_categories(&self, actor: &Actor) -> DocumentsResult<Vec<Category>> {
        if actor.is_admin() {
            Ok(self.categories.list_all().await?)
        } else {
            Ok(self.categories.list_active().await?)
        }
    }

    pub async fn update_category(
        &self,
        actor: &Actor,
        id: &str,
        input: CategoryUpdateInput,
    ) -> DocumentsResult<Category> {
        ensure_admin(actor)?;

        let validation_errors = validate_category_update(&input);
        if !validation_errors.is_empty() {
            return Err(DocumentsError::Validation(validation_errors));
        }

        let category = self.categories.update(id, &input).await?;
        info!("Updated category '{}' ({})", category.name, id);
        Ok(category)
    }

    /// Soft delete; historical documents keep referencing the row
    pub async fn deactivate_category(&self, actor: &Actor, id: &str) -> DocumentsResult<()> {
        ensure_admin(actor)?;
        self.categories.deactivate(id).await?;
        info!("Deactivated category {}", id);
        Ok(())
    }

    pub async fn create_letter_type(
        &self,
        actor: &Actor,
        input: LetterTypeCreateInput,
    ) -> DocumentsResult<LetterType> {
        ensure_admin(actor)?;

        let validation_errors = validate_letter_type_create(&input);
        if !validation_errors.is_empty() {
            return Err(DocumentsError::Validation(validation_errors));
        }

        let category = self
            .categories
            .get(&input.category_id)
            .await?
            .ok_or(DocumentsError::NotFound("Category"))?;
        if !category.is_active {
            return Err(DocumentsError::validation(
                "categoryId",
                "Category is no longer active",
            ));
        }

        let letter_type = self.letter_types.create(input).await?;
        info!(
            "Created letter type '{}' ({}) in category {}",
            letter_type.name, letter_type.id, category.id
        );
        Ok(letter_type)
    }

    pub async fn get_letter_type(&self, id: &str) -> DocumentsResult<LetterType> {
        self.letter_types
            .get(id)
            .await?
            .ok_or(DocumentsError::NotFound("Letter type"))
    }

    pub async fn list_letter_types(&self) -> DocumentsResult<Vec<LetterType>> {
        Ok(self.letter_types.list_active().await?)
    }

    pub async fn list_letter_types_by_category(
        &self,
        category_id: &str,
    ) -> DocumentsResult<Vec<LetterType>> {
        Ok(self.letter_types.list_by_category(category_id).await?)
    }

    pub async fn update_letter_type(
        &self,
        actor: &Actor,
        id: &str,
        input: LetterTypeUpdateInput,
    ) -> DocumentsResult<LetterType> {
        ensure_admin(actor)?;

        let validation_errors = validate_letter_type_update(&input);
        if !validation_errors.is_empty() {
            return Err(DocumentsError::Validation(validation_errors));
        }

        let letter_type = self.letter_types.update(id, &input).await?;
        info!("Updated letter type '{}' ({})", letter_type.name, id);
        Ok(letter_type)
    }

    pub async fn deactivate_letter_type(&self, actor: &Actor, id: &str) -> DocumentsResult<()> {
        ensure_admin(actor)?;
        self.letter_types.deactivate(id).await?;
        info!("Deactivated letter type {}", id);
        Ok(())
    }
}
