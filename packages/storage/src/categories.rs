// ABOUTME: Category storage layer using SQLite
// ABOUTME: CRUD with soft-delete via the is_active flag

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use letterhead_core::{generate_id, Category, CategoryCreateInput, CategoryUpdateInput};

use crate::{StorageError, StorageResult};

pub struct CategoryStorage {
    pool: SqlitePool,
}

impl CategoryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CategoryCreateInput) -> StorageResult<Category> {
        let id = generate_id();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, prefix, description, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, 1, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.name)
        .bind(&input.prefix)
        .bind(&input.description)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        debug!("Created category '{}' with ID {}", input.name, id);
        self.get(&id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn get(&self, id: &str) -> StorageResult<Option<Category>> {
        let row = sqlx::query("SELECT * FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(row_to_category(&row)?)),
            None => Ok(None),
        }
    }

    /// Active categories only; historical documents may still reference
    /// deactivated rows, which remain fetchable by ID.
    pub async fn list_active(&self) -> StorageResult<Vec<Category>> {
        let rows = sqlx::query("SELECT * FROM categories WHERE is_active = 1 ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_category).collect()
    }

    pub async fn list_all(&self) -> StorageResult<Vec<Category>> {
        let rows = sqlx::query("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_category).collect()
    }

    pub async fn update(&self, id: &str, input: &CategoryUpdateInput) -> StorageResult<Category> {
        let mut set_clauses: Vec<&str> = Vec::new();

        if input.name.is_some() {
            set_clauses.push("name = ?");
        }
        if input.prefix.is_some() {
            set_clauses.push("prefix = ?");
        }
        if input.description.is_some() {
            set_clauses.push("description = ?");
        }
        if input.is_active.is_some() {
            set_clauses.push("is_active = ?");
        }

        if set_clauses.is_empty() {
            return self.get(id).await?.ok_or(StorageError::NotFound);
        }

        set_clauses.push("updated_at = ?");
        let sql = format!(
            "UPDATE categories SET {} WHERE id = ?",
            set_clauses.join(", ")
        );

        let mut query = sqlx::query(&sql);
        if let Some(ref name) = input.name {
            query = query.bind(name);
        }
        if let Some(ref prefix) = input.prefix {
            query = query.bind(prefix);
        }
        if let Some(ref description) = input.description {
            query = query.bind(description);
        }
        if let Some(is_active) = input.is_active {
            query = query.bind(is_active);
        }
        query = query.bind(Utc::now().to_rfc3339()).bind(id);

        let result = query.execute(&self.pool).await.map_err(StorageError::Sqlx)?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Updated category with ID {}", id);
        self.get(id).await?.ok_or(StorageError::NotFound)
    }

    /// Soft delete: the row stays for historical documents
    pub async fn deactivate(&self, id: &str) -> StorageResult<()> {
        let result = sqlx::query(
            "UPDATE categories SET is_active = 0, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Deactivated category with ID {}", id);
        Ok(())
    }
}

fn row_to_category(row: &SqliteRow) -> StorageResult<Category> {
    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|_| StorageError::Database("Invalid created_at timestamp".to_string()))?
        .with_timezone(&Utc);
    let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
        .map_err(|_| StorageError::Database("Invalid updated_at timestamp".to_string()))?
        .with_timezone(&Utc);

    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        prefix: row.try_get("prefix")?,
        description: row.try_get("description")?,
        is_active: row.try_get("is_active")?,
        created_at,
        updated_at,
    })
}
