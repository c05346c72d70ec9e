use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status options for documents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Draft
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Draft => write!(f, "Draft"),
            DocumentStatus::Pending => write!(f, "Pending"),
            DocumentStatus::Approved => write!(f, "Approved"),
            DocumentStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

impl DocumentStatus {
    /// True for states that set approval/rejection metadata and never leave it
    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Approved | DocumentStatus::Rejected)
    }
}

/// Roles an authenticated actor can hold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Staff => write!(f, "Staff"),
        }
    }
}

/// Authenticated caller identity, supplied by the authentication layer
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A document (letter, certificate, circular)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    #[serde(rename = "letterTypeId")]
    pub letter_type_id: String,
    #[serde(rename = "letterNumber")]
    pub letter_number: String,
    #[serde(rename = "referenceNumber")]
    pub reference_number: String,
    #[serde(rename = "issueDate")]
    pub issue_date: NaiveDate,
    pub content: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "approvedBy")]
    pub approved_by: Option<String>,
    #[serde(rename = "approvedAt")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(rename = "rejectionReason")]
    pub rejection_reason: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Issue date rendered the way verification compares it, e.g. "05 March 2025"
    pub fn formatted_issue_date(&self) -> String {
        format_issue_date(self.issue_date)
    }
}

/// Render a calendar date as `DD Month YYYY`
pub fn format_issue_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// Public view of a document returned by verification; internal fields
/// (creator, approver, rejection reason) are deliberately absent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSummary {
    pub title: String,
    #[serde(rename = "letterNumber")]
    pub letter_number: String,
    #[serde(rename = "referenceNumber")]
    pub reference_number: String,
    #[serde(rename = "issueDate")]
    pub issue_date: NaiveDate,
    pub status: DocumentStatus,
}

impl From<Document> for DocumentSummary {
    fn from(doc: Document) -> Self {
        DocumentSummary {
            title: doc.title,
            letter_number: doc.letter_number,
            reference_number: doc.reference_number,
            issue_date: doc.issue_date,
            status: doc.status,
        }
    }
}

/// Input for creating a new document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentCreateInput {
    pub title: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    #[serde(rename = "letterTypeId")]
    pub letter_type_id: String,
    /// Generated from the category prefix when absent
    #[serde(rename = "letterNumber")]
    pub letter_number: Option<String>,
    #[serde(rename = "referenceNumber")]
    pub reference_number: Option<String>,
    #[serde(rename = "issueDate")]
    pub issue_date: NaiveDate,
    pub content: String,
    /// Only Draft or Pending are accepted at creation
    pub status: Option<DocumentStatus>,
}

/// Input for updating an existing document.
///
/// Workflow fields (`status`, `approvedBy`, `approvedAt`, `rejectionReason`)
/// are not part of this type; status moves only through the dedicated
/// transition operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentUpdateInput {
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
    pub issue_date: Option<NaiveDate>,
    pub content: Option<String>,
}

impl DocumentUpdateInput {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category_id.is_none()
            && self.letter_type_id.is_none()
            && self.letter_number.is_none()
            && self.reference_number.is_none()
            && self.issue_date.is_none()
            && self.content.is_none()
    }
}

/// Filter for querying documents
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    pub status: Option<DocumentStatus>,
    pub category_id: Option<String>,
    /// Ownership clause; set by the access policy, not by callers
    pub created_by: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// A grouping of letter types sharing an identifier prefix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub prefix: String,
    pub description: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreateInput {
    pub name: String,
    pub prefix: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdateInput {
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

/// A specific kind of document within a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterType {
    pub id: String,
    pub name: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub description: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterTypeCreateInput {
    pub name: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LetterTypeUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

/// A staff or administrator account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreateInput {
    pub name: String,
    pub email: String,
    pub role: Role,
}
