// ABOUTME: Bulk import of documents from pre-parsed spreadsheet rows
// ABOUTME: Invalid rows are skipped and reported, never failing the batch

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use letterhead_core::{Actor, DocumentCreateInput, DocumentStatus};

use crate::error::DocumentsResult;
use crate::service::DocumentsService;

/// One raw spreadsheet row. Parsing the spreadsheet itself happens upstream;
/// by the time rows arrive here they are plain string cells.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRow {
    pub title: Option<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    #[serde(rename = "letterTypeId")]
    pub letter_type_id: Option<String>,
    #[serde(rename = "letterNumber")]
    pub letter_number: Option<String>,
    #[serde(rename = "referenceNumber")]
    pub reference_number: Option<String>,
    #[serde(rename = "issueDate")]
    pub issue_date: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
}

/// Why a row was skipped
#[derive(Debug, Clone, Serialize)]
pub struct ImportRowError {
    /// 1-based row position in the submitted batch
    pub row: usize,
    pub message: String,
}

/// Outcome of a bulk import; created + skipped always equals the row count
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub created: usize,
    pub skipped: usize,
    pub errors: Vec<ImportRowError>,
}

fn row_to_input(row: &ImportRow) -> Result<DocumentCreateInput, String> {
    let title = required(&row.title, "title")?;
    let category_id = required(&row.category_id, "categoryId")?;
    let letter_type_id = required(&row.letter_type_id, "letterTypeId")?;
    let content = required(&row.content, "content")?;

    let issue_date_raw = required(&row.issue_date, "issueDate")?;
    let issue_date = NaiveDate::parse_from_str(&issue_date_raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid issueDate '{}', expected YYYY-MM-DD", issue_date_raw))?;

    let status = match row.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some("draft") => Some(DocumentStatus::Draft),
        Some("pending") => Some(DocumentStatus::Pending),
        Some(other) => {
            return Err(format!(
                "Invalid status '{}', imported rows may only be draft or pending",
                other
            ))
        }
    };

    Ok(DocumentCreateInput {
        title,
        category_id,
        letter_type_id,
        letter_number: row.letter_number.clone().filter(|n| !n.trim().is_empty()),
        reference_number: row
            .reference_number
            .clone()
            .filter(|n| !n.trim().is_empty()),
        issue_date,
        content,
        status,
    })
}

fn required(value: &Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(format!("Missing required field '{}'", field)),
    }
}

impl DocumentsService {
    /// Validates and creates documents from raw rows on behalf of `actor`.
    /// Each row stands alone: a bad row is recorded and skipped while the
    /// rest of the batch proceeds.
    pub async fn import_documents(
        &self,
        actor: &Actor,
        rows: Vec<ImportRow>,
    ) -> DocumentsResult<ImportSummary> {
        let total = rows.len();
        let mut created = 0;
        let mut errors = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            let row_number = index + 1;

            let input = match row_to_input(&row) {
                Ok(input) => input,
                Err(message) => {
                    errors.push(ImportRowError {
                        row: row_number,
                        message,
                    });
                    continue;
                }
            };

            // Cheap pre-check for explicit numbers; the unique index remains
            // the authority if a concurrent insert slips past it
            if let Some(ref number) = input.letter_number {
                if self.document_storage().letter_number_exists(number).await? {
                    errors.push(ImportRowError {
                        row: row_number,
                        message: format!("Letter number '{}' already exists", number),
                    });
                    continue;
                }
            }

            match self.create_document(actor, input).await {
                Ok(_) => created += 1,
                Err(e) => errors.push(ImportRowError {
                    row: row_number,
                    message: e.to_string(),
                }),
            }
        }

        let summary = ImportSummary {
            created,
            skipped: errors.len(),
            errors,
        };

        info!(
            "Imported {} of {} rows ({} skipped)",
            summary.created, total, summary.skipped
        );
        Ok(summary)
    }
}
