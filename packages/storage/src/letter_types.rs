// ABOUTME: Letter type storage layer using SQLite
// ABOUTME: CRUD scoped to owning categories, soft-delete via is_active

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use letterhead_core::{generate_id, LetterType, LetterTypeCreateInput, LetterTypeUpdateInput};

use crate::{StorageError, StorageResult};

pub struct LetterTypeStorage {
    pool: SqlitePool,
}

impl LetterTypeStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: LetterTypeCreateInput) -> StorageResult<LetterType> {
        let id = generate_id();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO letter_types (id, name, category_id, description, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, 1, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.name)
        .bind(&input.category_id)
        .bind(&input.description)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        debug!("Created letter type '{}' with ID {}", input.name, id);
        self.get(&id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn get(&self, id: &str) -> StorageResult<Option<LetterType>> {
        let row = sqlx::query("SELECT * FROM letter_types WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(row_to_letter_type(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_active(&self) -> StorageResult<Vec<LetterType>> {
        let rows = sqlx::query("SELECT * FROM letter_types WHERE is_active = 1 ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_letter_type).collect()
    }

    pub async fn list_by_category(&self, category_id: &str) -> StorageResult<Vec<LetterType>> {
        let rows = sqlx::query(
            "SELECT * FROM letter_types WHERE category_id = ? AND is_active = 1 ORDER BY name",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_letter_type).collect()
    }

    pub async fn update(
        &self,
        id: &str,
        input: &LetterTypeUpdateInput,
    ) -> StorageResult<LetterType> {
        let mut set_clauses: Vec<&str> = Vec::new();

        if input.name.is_some() {
            set_clauses.push("name = ?");
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
            "UPDATE letter_types SET {} WHERE id = ?",
            set_clauses.join(", ")
        );

        let mut query = sqlx::query(&sql);
        if let Some(ref name) = input.name {
            query = query.bind(name);
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

        debug!("Updated letter type with ID {}", id);
        self.get(id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn deactivate(&self, id: &str) -> StorageResult<()> {
        let result = sqlx::query(
            "UPDATE letter_types SET is_active = 0, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Deactivated letter type with ID {}", id);
        Ok(())
    }
}

fn row_to_letter_type(row: &SqliteRow) -> StorageResult<LetterType> {
    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|_| StorageError::Database("Invalid created_at timestamp".to_string()))?
        .with_timezone(&Utc);
    let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
        .map_err(|_| StorageError::Database("Invalid updated_at timestamp".to_string()))?
        .with_timezone(&Utc);

    Ok(LetterType {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category_id: row.try_get("category_id")?,
        description: row.try_get("description")?,
        is_active: row.try_get("is_active")?,
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_pool;
    use crate::CategoryStorage;
    use letterhead_core::CategoryCreateInput;

    async fn seed_category(pool: &SqlitePool) -> String {
        CategoryStorage::new(pool.clone())
            .create(CategoryCreateInput {
                name: "Employment".to_string(),
                prefix: "EMP".to_string(),
                description: None,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_list_by_category_excludes_inactive() {
        let pool = memory_pool().await;
        let category_id = seed_category(&pool).await;
        let storage = LetterTypeStorage::new(pool);

        let offer = storage
            .create(LetterTypeCreateInput {
                name: "Offer Letter".to_string(),
                category_id: category_id.clone(),
                description: None,
            })
            .await
            .unwrap();
        storage
            .create(LetterTypeCreateInput {
                name: "Relieving Letter".to_string(),
                category_id: category_id.clone(),
                description: None,
            })
            .await
            .unwrap();

        storage.deactivate(&offer.id).await.unwrap();

        let listed = storage.list_by_category(&category_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Relieving Letter");
    }
}
