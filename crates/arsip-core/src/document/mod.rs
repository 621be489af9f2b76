//! The canonical document record.
//!
//! Every other module works with [`Document`] only. Older record shapes are
//! accepted by its `Deserialize` impl, see [`wire`].

mod category;
mod date;
mod update;
pub mod wire;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

pub use self::category::Category;
pub use self::date::DocumentDate;
pub use self::update::DocumentUpdate;

/// A document record as the dashboard sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "wire::WireDocument")]
pub struct Document {
    /// Identifier assigned by the metadata store.
    pub id: i64,
    /// Human-readable title.
    pub name: String,
    /// Category of the document.
    pub category: Category,
    /// Calendar date the document refers to.
    pub date: DocumentDate,
    /// Relative reference to the stored file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Server-side creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Document {
    /// Creates a document without file reference or creation timestamp.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        category: Category,
        date: impl Into<DocumentDate>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            date: date.into(),
            file_path: None,
            created_at: None,
        }
    }

    /// Sets the stored file reference.
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Returns the base file name of the stored file, if any.
    ///
    /// Files are served as `/uploads/<base name>`.
    pub fn stored_file_name(&self) -> Option<&str> {
        let path = self.file_path.as_deref()?;
        path.rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_file_name_strips_directories() {
        let doc = Document::new(1, "SPPD", Category::Lampiran, "2024-03-05")
            .with_file_path("uploads/file-1-2.pdf");
        assert_eq!(doc.stored_file_name(), Some("file-1-2.pdf"));

        let windows = doc.clone().with_file_path("C:\\srv\\uploads\\file-3.pdf");
        assert_eq!(windows.stored_file_name(), Some("file-3.pdf"));

        let bare = Document::new(2, "SPPD", Category::Lampiran, "2024-03-05");
        assert_eq!(bare.stored_file_name(), None);
    }

    #[test]
    fn serializes_the_canonical_shape() {
        let doc = Document::new(3, "Laporan", Category::Keuangan, "2024-03-10")
            .with_file_path("uploads/file-9.pdf");
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "Laporan",
                "category": "Keuangan",
                "date": "2024-03-10",
                "file_path": "uploads/file-9.pdf",
            })
        );

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }
}
