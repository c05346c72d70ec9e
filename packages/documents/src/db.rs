// ABOUTME: Database connection management and service wiring
// ABOUTME: Provides shared state for API handlers

use std::sync::Arc;

use sqlx::SqlitePool;

use letterhead_storage::{
    CategoryStorage, DocumentStorage, LetterTypeStorage, StorageError, UserStorage,
};

use crate::catalog::CatalogService;
use crate::service::DocumentsService;
use crate::users::UsersService;

/// Shared state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub documents: Arc<DocumentsService>,
    pub catalog: Arc<CatalogService>,
    pub users: Arc<UsersService>,
}

impl DbState {
    /// Wire all services over one SQLite pool
    pub fn new(pool: SqlitePool) -> Result<Self, StorageError> {
        let document_storage = Arc::new(DocumentStorage::new(pool.clone()));
        let category_storage = Arc::new(CategoryStorage::new(pool.clone()));
        let letter_type_storage = Arc::new(LetterTypeStorage::new(pool.clone()));
        let user_storage = Arc::new(UserStorage::new(pool.clone()));

        let documents = Arc::new(DocumentsService::new(
            document_storage,
            category_storage.clone(),
            letter_type_storage.clone(),
        ));
        let catalog = Arc::new(CatalogService::new(category_storage, letter_type_storage));
        let users = Arc::new(UsersService::new(user_storage));

        Ok(Self {
            pool,
            documents,
            catalog,
            users,
        })
    }
}
