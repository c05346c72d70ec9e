// ABOUTME: End-to-end lifecycle tests for the documents service
// ABOUTME: Creation, workflow transitions, ownership policy, and conflicts

mod common;

use chrono::Datelike;
use common::{admin, document_input, seed_catalog, setup_state, staff};
use letterhead_documents::{
    DocumentFilter, DocumentStatus, DocumentUpdateInput, DocumentsError,
};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_draft_to_approved_lifecycle() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;
    let creator = staff("staff-1");

    // Create with an explicit letter number; status defaults to Draft
    let doc = state
        .documents
        .create_document(&creator, document_input(&cat, &lt, Some("RIPL/2025-26/04")))
        .await
        .unwrap();
    assert_eq!(doc.status, DocumentStatus::Draft);
    assert_eq!(doc.letter_number, "RIPL/2025-26/04");
    assert_eq!(doc.created_by, "staff-1");
    assert!(doc.approved_by.is_none());
    assert!(doc.approved_at.is_none());

    // Creator submits for review
    let doc = state
        .documents
        .transition_status(&creator, &doc.id, DocumentStatus::Pending, None)
        .await
        .unwrap();
    assert_eq!(doc.status, DocumentStatus::Pending);

    // Administrator approves
    let doc = state
        .documents
        .transition_status(&admin(), &doc.id, DocumentStatus::Approved, None)
        .await
        .unwrap();
    assert_eq!(doc.status, DocumentStatus::Approved);
    assert_eq!(doc.approved_by.as_deref(), Some("admin-1"));
    assert!(doc.approved_at.is_some());
}

#[tokio::test]
async fn test_rejection_requires_and_stores_reason() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;
    let creator = staff("staff-1");

    let mut input = document_input(&cat, &lt, None);
    input.status = Some(DocumentStatus::Pending);
    let doc = state
        .documents
        .create_document(&creator, input)
        .await
        .unwrap();

    // Empty reason is refused
    let err = state
        .documents
        .transition_status(&admin(), &doc.id, DocumentStatus::Rejected, Some(""))
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentsError::Validation(_)));

    let doc = state
        .documents
        .transition_status(
            &admin(),
            &doc.id,
            DocumentStatus::Rejected,
            Some("Incomplete details"),
        )
        .await
        .unwrap();
    assert_eq!(doc.status, DocumentStatus::Rejected);
    assert_eq!(doc.rejection_reason.as_deref(), Some("Incomplete details"));
    assert!(doc.approved_by.is_none());
    assert!(doc.approved_at.is_none());
}

#[tokio::test]
async fn test_duplicate_letter_number_conflicts() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;

    state
        .documents
        .create_document(
            &staff("staff-1"),
            document_input(&cat, &lt, Some("EMP/2025/101")),
        )
        .await
        .unwrap();

    let err = state
        .documents
        .create_document(
            &staff("staff-2"),
            document_input(&cat, &lt, Some("EMP/2025/101")),
        )
        .await
        .unwrap_err();

    match err {
        DocumentsError::Conflict(number) => assert_eq!(number, "EMP/2025/101"),
        other => panic!("Expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generated_identifiers_follow_format() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;

    let mut input = document_input(&cat, &lt, None);
    input.reference_number = None;
    let doc = state
        .documents
        .create_document(&staff("staff-1"), input)
        .await
        .unwrap();

    // EMP/{year}/{3 digits}
    let parts: Vec<&str> = doc.letter_number.split('/').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "EMP");
    assert_eq!(parts[2].len(), 3);
    assert!(parts[2].chars().all(|c| c.is_ascii_digit()));

    // REF/EMP/{MMYYYY}/{2 digits}
    let parts: Vec<&str> = doc.reference_number.split('/').collect();
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0], "REF");
    assert_eq!(parts[1], "EMP");
    assert_eq!(parts[2].len(), 6);
    assert_eq!(parts[3].len(), 2);
}

#[tokio::test]
async fn test_generation_retries_past_taken_numbers() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;
    let actor = staff("staff-1");
    let year = chrono::Utc::now().year();

    // Occupy a handful of suffixes; regeneration steps around them
    for suffix in 0..10 {
        let number = format!("EMP/{}/{:03}", year, suffix);
        state
            .documents
            .create_document(&actor, document_input(&cat, &lt, Some(number.as_str())))
            .await
            .unwrap();
    }

    let doc = state
        .documents
        .create_document(&actor, document_input(&cat, &lt, None))
        .await
        .unwrap();
    assert!(doc.letter_number.starts_with(&format!("EMP/{}/", year)));
}

#[tokio::test]
async fn test_generation_gives_up_when_all_suffixes_taken() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;
    let actor = staff("staff-1");
    let year = chrono::Utc::now().year();

    // Every EMP/{year}/NNN suffix exists, so each regeneration collides
    for suffix in 0..1000 {
        let number = format!("EMP/{}/{:03}", year, suffix);
        state
            .documents
            .create_document(&actor, document_input(&cat, &lt, Some(number.as_str())))
            .await
            .unwrap();
    }

    let err = state
        .documents
        .create_document(&actor, document_input(&cat, &lt, None))
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentsError::Conflict(_)));
}

#[tokio::test]
async fn test_update_to_existing_letter_number_conflicts() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;
    let actor = staff("staff-1");

    state
        .documents
        .create_document(&actor, document_input(&cat, &lt, Some("EMP/2025/601")))
        .await
        .unwrap();
    let second = state
        .documents
        .create_document(&actor, document_input(&cat, &lt, Some("EMP/2025/602")))
        .await
        .unwrap();

    let err = state
        .documents
        .update_document(
            &actor,
            &second.id,
            DocumentUpdateInput {
                letter_number: Some("EMP/2025/601".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    match err {
        DocumentsError::Conflict(number) => assert_eq!(number, "EMP/2025/601"),
        other => panic!("Expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_update_is_a_no_op() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;
    let actor = staff("staff-1");

    let doc = state
        .documents
        .create_document(&actor, document_input(&cat, &lt, Some("EMP/2025/603")))
        .await
        .unwrap();

    let unchanged = state
        .documents
        .update_document(&actor, &doc.id, DocumentUpdateInput::default())
        .await
        .unwrap();

    assert_eq!(unchanged.title, doc.title);
    assert_eq!(unchanged.updated_at, doc.updated_at);
}

#[tokio::test]
async fn test_listing_respects_ownership() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;

    state
        .documents
        .create_document(
            &staff("staff-1"),
            document_input(&cat, &lt, Some("EMP/2025/201")),
        )
        .await
        .unwrap();
    state
        .documents
        .create_document(
            &staff("staff-2"),
            document_input(&cat, &lt, Some("EMP/2025/202")),
        )
        .await
        .unwrap();

    let mine = state
        .documents
        .list_documents(&staff("staff-1"), DocumentFilter::default())
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].created_by, "staff-1");

    // A staff filter naming someone else is still forced back to their own
    let filter = DocumentFilter {
        created_by: Some("staff-2".to_string()),
        ..Default::default()
    };
    let mine = state
        .documents
        .list_documents(&staff("staff-1"), filter)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].created_by, "staff-1");

    let all = state
        .documents
        .list_documents(&admin(), DocumentFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_foreign_document_is_not_found_not_forbidden() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;

    let doc = state
        .documents
        .create_document(
            &staff("staff-1"),
            document_input(&cat, &lt, Some("EMP/2025/301")),
        )
        .await
        .unwrap();

    let err = state
        .documents
        .get_document(&staff("staff-2"), &doc.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentsError::NotFound(_)));

    let err = state
        .documents
        .transition_status(&staff("staff-2"), &doc.id, DocumentStatus::Pending, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentsError::NotFound(_)));
}

#[tokio::test]
async fn test_update_rejects_mismatched_letter_type() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;

    // Second category with its own letter type
    let other_category = state
        .catalog
        .create_category(
            &admin(),
            letterhead_documents::CategoryCreateInput {
                name: "Circulars".to_string(),
                prefix: "CIR".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    let doc = state
        .documents
        .create_document(
            &staff("staff-1"),
            document_input(&cat, &lt, Some("EMP/2025/401")),
        )
        .await
        .unwrap();

    // Moving the document to another category without a matching letter type
    let err = state
        .documents
        .update_document(
            &staff("staff-1"),
            &doc.id,
            DocumentUpdateInput {
                category_id: Some(other_category.id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentsError::Validation(_)));
}

#[tokio::test]
async fn test_admin_deletes_any_document() {
    let state = setup_state().await;
    let (cat, lt) = seed_catalog(&state).await;

    let doc = state
        .documents
        .create_document(
            &staff("staff-1"),
            document_input(&cat, &lt, Some("EMP/2025/501")),
        )
        .await
        .unwrap();

    state
        .documents
        .delete_document(&admin(), &doc.id)
        .await
        .unwrap();

    let err = state
        .documents
        .get_document(&admin(), &doc.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentsError::NotFound(_)));
}
