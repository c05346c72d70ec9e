//! Status workflow: Draft → Pending → Approved | Rejected.
//!
//! Approved and Rejected are terminal. The workflow is the only path to the
//! `status`, `approved_by`, `approved_at`, and `rejection_reason` fields;
//! generic updates cannot reach them for any caller.

use chrono::{DateTime, Utc};

use letterhead_core::{validate_rejection_reason, Actor, Document, DocumentStatus};
use letterhead_storage::StatusChange;

use crate::error::{DocumentsError, DocumentsResult};

/// Decide whether `actor` may move `document` to `target`, and which
/// workflow fields the move sets. Pure; the service applies the result.
pub fn plan_transition(
    document: &Document,
    target: DocumentStatus,
    actor: &Actor,
    rejection_reason: Option<&str>,
    now: DateTime<Utc>,
) -> DocumentsResult<StatusChange> {
    match (document.status, target) {
        (DocumentStatus::Draft, DocumentStatus::Pending) => {
            // Creator submits for review; admins may submit on their behalf
            if !actor.is_admin() && actor.id != document.created_by {
                return Err(DocumentsError::Forbidden);
            }
            Ok(StatusChange {
                status: DocumentStatus::Pending,
                approved_by: None,
                approved_at: None,
                rejection_reason: None,
            })
        }
        (DocumentStatus::Pending, DocumentStatus::Approved) => {
            if !actor.is_admin() {
                return Err(DocumentsError::Forbidden);
            }
            Ok(StatusChange {
                status: DocumentStatus::Approved,
                approved_by: Some(actor.id.clone()),
                approved_at: Some(now),
                rejection_reason: None,
            })
        }
        (DocumentStatus::Pending, DocumentStatus::Rejected) => {
            if !actor.is_admin() {
                return Err(DocumentsError::Forbidden);
            }
            let errors = validate_rejection_reason(rejection_reason);
            if !errors.is_empty() {
                return Err(DocumentsError::Validation(errors));
            }
            Ok(StatusChange {
                status: DocumentStatus::Rejected,
                approved_by: None,
                approved_at: None,
                // Stored exactly as supplied; only non-emptiness is checked
                rejection_reason: rejection_reason.map(str::to_string),
            })
        }
        (current, target) => Err(DocumentsError::validation(
            "status",
            &format!("Cannot move a {} document to {}", current, target),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use letterhead_core::Role;

    fn admin() -> Actor {
        Actor {
            id: "admin-1".to_string(),
            role: Role::Admin,
        }
    }

    fn staff(id: &str) -> Actor {
        Actor {
            id: id.to_string(),
            role: Role::Staff,
        }
    }

    fn document(status: DocumentStatus) -> Document {
        let now = Utc::now();
        Document {
            id: "doc-1".to_string(),
            title: "Offer of Employment".to_string(),
            category_id: "cat-1".to_string(),
            letter_type_id: "lt-1".to_string(),
            letter_number: "RIPL/2025-26/04".to_string(),
            reference_number: "REF/RIPL/032025/07".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            content: "body".to_string(),
            status,
            created_by: "staff-1".to_string(),
            approved_by: None,
            approved_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_creator_submits_draft() {
        let change = plan_transition(
            &document(DocumentStatus::Draft),
            DocumentStatus::Pending,
            &staff("staff-1"),
            None,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(change.status, DocumentStatus::Pending);
        assert!(change.approved_by.is_none());
    }

    #[test]
    fn test_non_creator_cannot_submit() {
        let err = plan_transition(
            &document(DocumentStatus::Draft),
            DocumentStatus::Pending,
            &staff("staff-2"),
            None,
            Utc::now(),
        )
        .unwrap_err();

        assert!(matches!(err, DocumentsError::Forbidden));
    }

    #[test]
    fn test_admin_approves_pending() {
        let now = Utc::now();
        let change = plan_transition(
            &document(DocumentStatus::Pending),
            DocumentStatus::Approved,
            &admin(),
            None,
            now,
        )
        .unwrap();

        assert_eq!(change.status, DocumentStatus::Approved);
        assert_eq!(change.approved_by.as_deref(), Some("admin-1"));
        assert_eq!(change.approved_at, Some(now));
    }

    #[test]
    fn test_staff_cannot_approve() {
        let err = plan_transition(
            &document(DocumentStatus::Pending),
            DocumentStatus::Approved,
            &staff("staff-1"),
            None,
            Utc::now(),
        )
        .unwrap_err();

        assert!(matches!(err, DocumentsError::Forbidden));
    }

    #[test]
    fn test_reject_requires_reason() {
        let err = plan_transition(
            &document(DocumentStatus::Pending),
            DocumentStatus::Rejected,
            &admin(),
            Some("   "),
            Utc::now(),
        )
        .unwrap_err();

        match err {
            DocumentsError::Validation(errors) => {
                assert_eq!(errors[0].field, "rejectionReason");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_stores_reason_verbatim() {
        let change = plan_transition(
            &document(DocumentStatus::Pending),
            DocumentStatus::Rejected,
            &admin(),
            Some("  Incomplete details \n"),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(change.status, DocumentStatus::Rejected);
        assert_eq!(
            change.rejection_reason.as_deref(),
            Some("  Incomplete details \n")
        );
        assert!(change.approved_by.is_none());
    }

    #[test]
    fn test_approve_requires_pending() {
        for current in [
            DocumentStatus::Draft,
            DocumentStatus::Approved,
            DocumentStatus::Rejected,
        ] {
            let err = plan_transition(
                &document(current),
                DocumentStatus::Approved,
                &admin(),
                None,
                Utc::now(),
            )
            .unwrap_err();
            assert!(matches!(err, DocumentsError::Validation(_)));
        }
    }

    #[test]
    fn test_terminal_states_cannot_reopen() {
        let err = plan_transition(
            &document(DocumentStatus::Approved),
            DocumentStatus::Draft,
            &admin(),
            None,
            Utc::now(),
        )
        .unwrap_err();

        assert!(matches!(err, DocumentsError::Validation(_)));
    }
}
