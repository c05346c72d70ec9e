// ABOUTME: Document storage layer using SQLite
// ABOUTME: CRUD with ownership-scoped queries and unique letter number mapping

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use letterhead_core::{
    generate_id, Document, DocumentFilter, DocumentStatus, DocumentUpdateInput,
};

use crate::{is_unique_violation, StorageError, StorageResult};

/// Fully resolved data for a document insert.
///
/// Identifier generation and reference validation happen in the service
/// layer; by the time this struct exists every field is final.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub category_id: String,
    pub letter_type_id: String,
    pub letter_number: String,
    pub reference_number: String,
    pub issue_date: NaiveDate,
    pub content: String,
    pub status: DocumentStatus,
    pub created_by: String,
}

/// Workflow fields applied by a status transition
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: DocumentStatus,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

pub struct DocumentStorage {
    pool: SqlitePool,
}

impl DocumentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: NewDocument) -> StorageResult<Document> {
        let id = generate_id();
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO documents (
                id, title, category_id, letter_type_id, letter_number,
                reference_number, issue_date, content, status, created_by,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.title)
        .bind(&input.category_id)
        .bind(&input.letter_type_id)
        .bind(&input.letter_number)
        .bind(&input.reference_number)
        .bind(input.issue_date.to_string())
        .bind(&input.content)
        .bind(status_to_string(&input.status))
        .bind(&input.created_by)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!("Created document '{}' with ID {}", input.letter_number, id);
                self.get(&id, None).await?.ok_or(StorageError::NotFound)
            }
            Err(sqlx::Error::Database(db_err)) => {
                // The UNIQUE index on letter_number is the authoritative
                // duplicate signal; any pre-check is best-effort only.
                if is_unique_violation(db_err.as_ref())
                    && db_err.message().contains("letter_number")
                {
                    return Err(StorageError::DuplicateLetterNumber(input.letter_number));
                }
                Err(StorageError::Sqlx(sqlx::Error::Database(db_err)))
            }
            Err(e) => Err(StorageError::Sqlx(e)),
        }
    }

    /// Fetch by ID; when `owner` is set the row must also match `created_by`,
    /// so a non-owner resolves to None rather than leaking existence.
    pub async fn get(&self, id: &str, owner: Option<&str>) -> StorageResult<Option<Document>> {
        let row = match owner {
            Some(owner_id) => {
                sqlx::query("SELECT * FROM documents WHERE id = ? AND created_by = ?")
                    .bind(id)
                    .bind(owner_id)
                    .fetch_optional(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT * FROM documents WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
            }
        }
        .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(row_to_document(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_letter_number(
        &self,
        letter_number: &str,
    ) -> StorageResult<Option<Document>> {
        let row = sqlx::query("SELECT * FROM documents WHERE letter_number = ?")
            .bind(letter_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(row_to_document(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_letter_and_reference(
        &self,
        letter_number: &str,
        reference_number: &str,
    ) -> StorageResult<Option<Document>> {
        let row = sqlx::query(
            "SELECT * FROM documents WHERE letter_number = ? AND reference_number = ?",
        )
        .bind(letter_number)
        .bind(reference_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(row_to_document(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn letter_number_exists(&self, letter_number: &str) -> StorageResult<bool> {
        let row = sqlx::query("SELECT 1 FROM documents WHERE letter_number = ?")
            .bind(letter_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(row.is_some())
    }

    pub async fn list(&self, filter: &DocumentFilter) -> StorageResult<Vec<Document>> {
        let mut where_conditions: Vec<&str> = Vec::new();
        let mut query_params: Vec<String> = Vec::new();

        if let Some(status) = &filter.status {
            where_conditions.push("status = ?");
            query_params.push(status_to_string(status).to_string());
        }

        if let Some(category_id) = &filter.category_id {
            where_conditions.push("category_id = ?");
            query_params.push(category_id.clone());
        }

        if let Some(created_by) = &filter.created_by {
            where_conditions.push("created_by = ?");
            query_params.push(created_by.clone());
        }

        let mut sql = "SELECT * FROM documents".to_string();
        if !where_conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
            if let Some(offset) = filter.offset {
                sql.push_str(&format!(" OFFSET {}", offset));
            }
        }

        let mut query = sqlx::query(&sql);
        for param in &query_params {
            query = query.bind(param);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_document).collect()
    }

    /// Partial update of non-workflow fields. `status`, `approved_by`,
    /// `approved_at`, and `rejection_reason` are only writable through
    /// `apply_status`.
    pub async fn update(
        &self,
        id: &str,
        owner: Option<&str>,
        input: &DocumentUpdateInput,
    ) -> StorageResult<Document> {
        let mut set_clauses: Vec<&str> = Vec::new();

        if input.title.is_some() {
            set_clauses.push("title = ?");
        }
        if input.category_id.is_some() {
            set_clauses.push("category_id = ?");
        }
        if input.letter_type_id.is_some() {
            set_clauses.push("letter_type_id = ?");
        }
        if input.letter_number.is_some() {
            set_clauses.push("letter_number = ?");
        }
        if input.reference_number.is_some() {
            set_clauses.push("reference_number = ?");
        }
        if input.issue_date.is_some() {
            set_clauses.push("issue_date = ?");
        }
        if input.content.is_some() {
            set_clauses.push("content = ?");
        }

        if set_clauses.is_empty() {
            return self.get(id, owner).await?.ok_or(StorageError::NotFound);
        }

        set_clauses.push("updated_at = ?");

        let mut sql = format!("UPDATE documents SET {} WHERE id = ?", set_clauses.join(", "));
        if owner.is_some() {
            sql.push_str(" AND created_by = ?");
        }

        let mut query = sqlx::query(&sql);

        if let Some(ref title) = input.title {
            query = query.bind(title);
        }
        if let Some(ref category_id) = input.category_id {
            query = query.bind(category_id);
        }
        if let Some(ref letter_type_id) = input.letter_type_id {
            query = query.bind(letter_type_id);
        }
        if let Some(ref letter_number) = input.letter_number {
            query = query.bind(letter_number);
        }
        if let Some(ref reference_number) = input.reference_number {
            query = query.bind(reference_number);
        }
        if let Some(issue_date) = input.issue_date {
            query = query.bind(issue_date.to_string());
        }
        if let Some(ref content) = input.content {
            query = query.bind(content);
        }

        query = query.bind(Utc::now().to_rfc3339()).bind(id);
        if let Some(owner_id) = owner {
            query = query.bind(owner_id);
        }

        let result = query.execute(&self.pool).await;

        match result {
            Ok(result) => {
                if result.rows_affected() == 0 {
                    return Err(StorageError::NotFound);
                }
                debug!("Updated document with ID {}", id);
                self.get(id, None).await?.ok_or(StorageError::NotFound)
            }
            Err(sqlx::Error::Database(db_err)) => {
                if is_unique_violation(db_err.as_ref())
                    && db_err.message().contains("letter_number")
                {
                    return Err(StorageError::DuplicateLetterNumber(
                        input.letter_number.clone().unwrap_or_default(),
                    ));
                }
                Err(StorageError::Sqlx(sqlx::Error::Database(db_err)))
            }
            Err(e) => Err(StorageError::Sqlx(e)),
        }
    }

    /// Overwrite the workflow fields as one unit
    pub async fn apply_status(&self, id: &str, change: StatusChange) -> StorageResult<Document> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET status = ?, approved_by = ?, approved_at = ?, rejection_reason = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status_to_string(&change.status))
        .bind(&change.approved_by)
        .bind(change.approved_at.map(|t| t.to_rfc3339()))
        .bind(&change.rejection_reason)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Document {} moved to status {}", id, change.status);
        self.get(id, None).await?.ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: &str, owner: Option<&str>) -> StorageResult<()> {
        let result = match owner {
            Some(owner_id) => {
                sqlx::query("DELETE FROM documents WHERE id = ? AND created_by = ?")
                    .bind(id)
                    .bind(owner_id)
                    .execute(&self.pool)
                    .await
            }
            None => {
                sqlx::query("DELETE FROM documents WHERE id = ?")
                    .bind(id)
                    .execute(&self.pool)
                    .await
            }
        }
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Deleted document with ID {}", id);
        Ok(())
    }
}

fn status_to_string(status: &DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Draft => "draft",
        DocumentStatus::Pending => "pending",
        DocumentStatus::Approved => "approved",
        DocumentStatus::Rejected => "rejected",
    }
}

fn row_to_document(row: &SqliteRow) -> StorageResult<Document> {
    let status_str: String = row.try_get("status")?;
    let status = match status_str.as_str() {
        "draft" => DocumentStatus::Draft,
        "pending" => DocumentStatus::Pending,
        "approved" => DocumentStatus::Approved,
        "rejected" => DocumentStatus::Rejected,
        _ => DocumentStatus::Draft,
    };

    let issue_date_str: String = row.try_get("issue_date")?;
    let issue_date = NaiveDate::parse_from_str(&issue_date_str, "%Y-%m-%d")
        .map_err(|_| StorageError::Database("Invalid issue_date".to_string()))?;

    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|_| StorageError::Database("Invalid created_at timestamp".to_string()))?
        .with_timezone(&Utc);

    let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
        .map_err(|_| StorageError::Database("Invalid updated_at timestamp".to_string()))?
        .with_timezone(&Utc);

    let approved_at = row
        .try_get::<Option<String>, _>("approved_at")?
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| StorageError::Database("Invalid approved_at timestamp".to_string()))
        })
        .transpose()?;

    Ok(Document {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        category_id: row.try_get("category_id")?,
        letter_type_id: row.try_get("letter_type_id")?,
        letter_number: row.try_get("letter_number")?,
        reference_number: row.try_get("reference_number")?,
        issue_date,
        content: row.try_get("content")?,
        status,
        created_by: row.try_get("created_by")?,
        approved_by: row.try_get("approved_by")?,
        approved_at,
        rejection_reason: row.try_get("rejection_reason")?,
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_pool;
    use crate::{CategoryStorage, LetterTypeStorage};
    use letterhead_core::{CategoryCreateInput, LetterTypeCreateInput};

    async fn seed_reference_data(pool: &SqlitePool) -> (String, String) {
        let categories = CategoryStorage::new(pool.clone());
        let category = categories
            .create(CategoryCreateInput {
                name: "Employment Letters".to_string(),
                prefix: "EMP".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let letter_types = LetterTypeStorage::new(pool.clone());
        let letter_type = letter_types
            .create(LetterTypeCreateInput {
                name: "Offer Letter".to_string(),
                category_id: category.id.clone(),
                description: None,
            })
            .await
            .unwrap();

        (category.id, letter_type.id)
    }

    fn new_document(category_id: &str, letter_type_id: &str, letter_number: &str) -> NewDocument {
        NewDocument {
            title: "Offer of Employment".to_string(),
            category_id: category_id.to_string(),
            letter_type_id: letter_type_id.to_string(),
            letter_number: letter_number.to_string(),
            reference_number: "REF/EMP/032025/07".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            content: "We are pleased to offer...".to_string(),
            status: DocumentStatus::Draft,
            created_by: "user-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_document() {
        let pool = memory_pool().await;
        let (cat, lt) = seed_reference_data(&pool).await;
        let storage = DocumentStorage::new(pool);

        let created = storage
            .create(new_document(&cat, &lt, "EMP/2025/001"))
            .await
            .unwrap();
        assert_eq!(created.status, DocumentStatus::Draft);
        assert_eq!(created.letter_number, "EMP/2025/001");
        assert!(created.approved_by.is_none());

        let fetched = storage.get(&created.id, None).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Offer of Employment");
        assert_eq!(fetched.issue_date, created.issue_date);
    }

    #[tokio::test]
    async fn test_duplicate_letter_number_is_rejected() {
        let pool = memory_pool().await;
        let (cat, lt) = seed_reference_data(&pool).await;
        let storage = DocumentStorage::new(pool);

        storage
            .create(new_document(&cat, &lt, "RIPL/2025-26/04"))
            .await
            .unwrap();

        let err = storage
            .create(new_document(&cat, &lt, "RIPL/2025-26/04"))
            .await
            .unwrap_err();

        match err {
            StorageError::DuplicateLetterNumber(n) => assert_eq!(n, "RIPL/2025-26/04"),
            other => panic!("Expected DuplicateLetterNumber, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_owner_scope_hides_foreign_documents() {
        let pool = memory_pool().await;
        let (cat, lt) = seed_reference_data(&pool).await;
        let storage = DocumentStorage::new(pool);

        let doc = storage
            .create(new_document(&cat, &lt, "EMP/2025/010"))
            .await
            .unwrap();

        assert!(storage
            .get(&doc.id, Some("user-1"))
            .await
            .unwrap()
            .is_some());
        assert!(storage
            .get(&doc.id, Some("someone-else"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_owner_and_status() {
        let pool = memory_pool().await;
        let (cat, lt) = seed_reference_data(&pool).await;
        let storage = DocumentStorage::new(pool);

        let mut mine = new_document(&cat, &lt, "EMP/2025/020");
        mine.status = DocumentStatus::Pending;
        storage.create(mine).await.unwrap();

        let mut other = new_document(&cat, &lt, "EMP/2025/021");
        other.created_by = "user-2".to_string();
        storage.create(other).await.unwrap();

        let filter = DocumentFilter {
            created_by: Some("user-1".to_string()),
            ..Default::default()
        };
        let docs = storage.list(&filter).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].created_by, "user-1");

        let filter = DocumentFilter {
            status: Some(DocumentStatus::Pending),
            ..Default::default()
        };
        let docs = storage.list(&filter).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].status, DocumentStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_does_not_touch_workflow_fields() {
        let pool = memory_pool().await;
        let (cat, lt) = seed_reference_data(&pool).await;
        let storage = DocumentStorage::new(pool);

        let doc = storage
            .create(new_document(&cat, &lt, "EMP/2025/030"))
            .await
            .unwrap();

        let updated = storage
            .update(
                &doc.id,
                None,
                &DocumentUpdateInput {
                    title: Some("Revised Offer".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Revised Offer");
        assert_eq!(updated.status, DocumentStatus::Draft);
        assert!(updated.approved_by.is_none());
        assert!(updated.rejection_reason.is_none());
    }

    #[tokio::test]
    async fn test_apply_status_sets_approval_metadata() {
        let pool = memory_pool().await;
        let (cat, lt) = seed_reference_data(&pool).await;
        let storage = DocumentStorage::new(pool);

        let mut input = new_document(&cat, &lt, "EMP/2025/040");
        input.status = DocumentStatus::Pending;
        let doc = storage.create(input).await.unwrap();

        let approved_at = Utc::now();
        let updated = storage
            .apply_status(
                &doc.id,
                StatusChange {
                    status: DocumentStatus::Approved,
                    approved_by: Some("admin-1".to_string()),
                    approved_at: Some(approved_at),
                    rejection_reason: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, DocumentStatus::Approved);
        assert_eq!(updated.approved_by.as_deref(), Some("admin-1"));
        assert!(updated.approved_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_scoped_to_owner() {
        let pool = memory_pool().await;
        let (cat, lt) = seed_reference_data(&pool).await;
        let storage = DocumentStorage::new(pool);

        let doc = storage
            .create(new_document(&cat, &lt, "EMP/2025/050"))
            .await
            .unwrap();

        let err = storage.delete(&doc.id, Some("intruder")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));

        storage.delete(&doc.id, Some("user-1")).await.unwrap();
        assert!(storage.get(&doc.id, None).await.unwrap().is_none());
    }
}
