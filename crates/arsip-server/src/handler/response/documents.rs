//! Document response types.

use arsip_core::bulk::BulkDeleteReport;
use arsip_core::document::{self, Category};
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A document record in its canonical shape.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    /// Identifier assigned at creation.
    pub id: i64,
    /// Human-readable title.
    pub name: String,
    /// Category of the document.
    pub category: Category,
    /// Calendar date of the document, `YYYY-MM-DD`.
    pub date: String,
    /// Reference to the stored file, `uploads/<stored name>`.
    pub file_path: Option<String>,
    /// URL the stored file is served under.
    pub file_url: Option<String>,
    /// Timestamp when the document was recorded.
    pub created_at: Option<Timestamp>,
}

impl From<document::Document> for Document {
    fn from(document: document::Document) -> Self {
        Self {
            file_url: document
                .stored_file_name()
                .map(|name| format!("/uploads/{name}")),

            id: document.id,
            name: document.name,
            category: document.category,
            date: document.date.as_str().to_owned(),
            file_path: document.file_path,
            created_at: document.created_at,
        }
    }
}

/// Response for listing all documents.
pub type Documents = Vec<Document>;

/// Outcome of deleting one id in a bulk request.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteResult {
    /// Identifier that was requested.
    pub id: i64,
    /// Whether the document is gone.
    pub deleted: bool,
    /// Failure kind, e.g. `not_found`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for bulk deletion, one entry per distinct id.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BulkDelete {
    /// Summary such as `8 of 10 deleted, 2 failed`.
    pub message: String,
    pub total: usize,
    pub deleted: usize,
    pub failed: usize,
    /// Outcomes in the order the deletes ran.
    pub results: Vec<DeleteResult>,
}

impl From<BulkDeleteReport> for BulkDelete {
    fn from(report: BulkDeleteReport) -> Self {
        let message = report.summary();
        let total = report.total();
        let deleted = report.deleted_count();
        let failed = report.failed_count();

        let results = report
            .outcomes
            .into_iter()
            .map(|outcome| match outcome.result {
                Ok(()) => DeleteResult {
                    id: outcome.id,
                    deleted: true,
                    error: None,
                    message: None,
                },
                Err(err) => DeleteResult {
                    id: outcome.id,
                    deleted: false,
                    error: Some(err.kind.as_ref().to_owned()),
                    message: err.message,
                },
            })
            .collect();

        Self {
            message,
            total,
            deleted,
            failed,
            results,
        }
    }
}
