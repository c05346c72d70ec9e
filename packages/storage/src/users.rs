// ABOUTME: User storage layer using SQLite
// ABOUTME: Handles CRUD operations for staff and administrator accounts

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use letterhead_core::{generate_id, Role, User, UserCreateInput};

use crate::{is_unique_violation, StorageError, StorageResult};

pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: UserCreateInput) -> StorageResult<User> {
        let id = generate_id();
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(role_to_string(&input.role))
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!("Created user '{}' with ID {}", input.email, id);
                self.get(&id).await?.ok_or(StorageError::NotFound)
            }
            Err(sqlx::Error::Database(db_err)) => {
                if is_unique_violation(db_err.as_ref()) && db_err.message().contains("email") {
                    return Err(StorageError::DuplicateEmail(input.email));
                }
                Err(StorageError::Sqlx(sqlx::Error::Database(db_err)))
            }
            Err(e) => Err(StorageError::Sqlx(e)),
        }
    }

    pub async fn get(&self, user_id: &str) -> StorageResult<Option<User>> {
        debug!("Fetching user: {}", user_id);

        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> StorageResult<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_user).collect()
    }

    pub async fn delete(&self, user_id: &str) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Deleted user with ID {}", user_id);
        Ok(())
    }
}

fn role_to_string(role: &Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Staff => "staff",
    }
}

fn row_to_user(row: &SqliteRow) -> StorageResult<User> {
    let role_str: String = row.try_get("role")?;
    let role = match role_str.as_str() {
        "admin" => Role::Admin,
        _ => Role::Staff,
    };

    let created_at_str: String = row.try_get("created_at")?;
    let updated_at_str: String = row.try_get("updated_at")?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|_| StorageError::Database("Invalid created_at timestamp".to_string()))?
        .with_timezone(&Utc);
    let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
        .map_err(|_| StorageError::Database("Invalid updated_at timestamp".to_string()))?
        .with_timezone(&Utc);

    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        role,
        created_at,
        updated_at,
    })
}
