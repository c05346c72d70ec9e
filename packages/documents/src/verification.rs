//! Public verification lookup.
//!
//! Read-only and unauthenticated; a legitimate "no match" is a result, not
//! an error. Only transport/storage failures propagate as errors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use letterhead_core::{format_issue_date, DocumentSummary};

use crate::error::DocumentsResult;
use crate::service::DocumentsService;

/// Three-field verification query
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationRequest {
    #[serde(rename = "letterNumber")]
    pub letter_number: String,
    #[serde(rename = "referenceNumber")]
    pub reference_number: String,
    #[serde(rename = "issueDate")]
    pub issue_date: NaiveDate,
}

/// Result of a verification lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum VerificationOutcome {
    Verified { document: DocumentSummary },
    NotVerified { reason: String },
}

impl VerificationOutcome {
    fn no_match() -> Self {
        VerificationOutcome::NotVerified {
            reason: "No matching document found".to_string(),
        }
    }
}

impl DocumentsService {
    /// Single-field variant: exact letter number match
    pub async fn verify_letter_number(
        &self,
        letter_number: &str,
    ) -> DocumentsResult<VerificationOutcome> {
        debug!("Verification lookup for letter number '{}'", letter_number);

        match self
            .document_storage()
            .find_by_letter_number(letter_number)
            .await?
        {
            Some(document) => Ok(VerificationOutcome::Verified {
                document: document.into(),
            }),
            None => Ok(VerificationOutcome::no_match()),
        }
    }

    /// Three-field variant: letter number, reference number, and the issue
    /// date rendered as `DD Month YYYY` must all agree
    pub async fn verify_details(
        &self,
        request: &VerificationRequest,
    ) -> DocumentsResult<VerificationOutcome> {
        debug!(
            "Verification lookup for letter number '{}' / reference '{}'",
            request.letter_number, request.reference_number
        );

        let document = match self
            .document_storage()
            .find_by_letter_and_reference(&request.letter_number, &request.reference_number)
            .await?
        {
            Some(document) => document,
            None => return Ok(VerificationOutcome::no_match()),
        };

        if format_issue_date(request.issue_date) != document.formatted_issue_date() {
            return Ok(VerificationOutcome::no_match());
        }

        Ok(VerificationOutcome::Verified {
            document: document.into(),
        })
    }
}
