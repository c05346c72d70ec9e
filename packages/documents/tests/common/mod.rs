// ABOUTME: Common test utilities for service integration tests
// ABOUTME: Provides in-memory database setup and seeded reference data

use letterhead_core::{
    Actor, CategoryCreateInput, DocumentCreateInput, LetterTypeCreateInput, Role,
};
use letterhead_documents::DbState;
use sqlx::sqlite::SqlitePoolOptions;

/// Create an isolated in-memory database with migrations applied
pub async fn setup_state() -> DbState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::migrate!("../storage/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    DbState::new(pool).expect("Failed to create DbState")
}

pub fn admin() -> Actor {
    Actor {
        id: "admin-1".to_string(),
        role: Role::Admin,
    }
}

pub fn staff(id: &str) -> Actor {
    Actor {
        id: id.to_string(),
        role: Role::Staff,
    }
}

/// Seed one category ("EMP") with one letter type, returning their IDs
pub async fn seed_catalog(state: &DbState) -> (String, String) {
    let category = state
        .catalog
        .create_category(
            &admin(),
            CategoryCreateInput {
                name: "Employment Letters".to_string(),
                prefix: "EMP".to_string(),
                description: Some("Offer and relieving letters".to_string()),
            },
        )
        .await
        .unwrap();

    let letter_type = state
        .catalog
        .create_letter_type(
            &admin(),
            LetterTypeCreateInput {
                name: "Offer Letter".to_string(),
                category_id: category.id.clone(),
                description: None,
            },
        )
        .await
        .unwrap();

    (category.id, letter_type.id)
}

pub fn document_input(
    category_id: &str,
    letter_type_id: &str,
    letter_number: Option<&str>,
) -> DocumentCreateInput {
    DocumentCreateInput {
        title: "Offer of Employment".to_string(),
        category_id: category_id.to_string(),
        letter_type_id: letter_type_id.to_string(),
        letter_number: letter_number.map(|n| n.to_string()),
        reference_number: Some("REF/EMP/032025/07".to_string()),
        issue_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        content: "We are pleased to offer you the position...".to_string(),
        status: None,
    }
}
