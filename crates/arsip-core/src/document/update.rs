use serde::{Deserialize, Serialize};

use super::{Category, Document, DocumentDate};
use crate::{Error, Result};

/// Partial metadata change for an existing document.
///
/// The stored file reference is never part of an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpdate {
    #[serde(default, alias = "nama_sppd", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "kategori", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, alias = "tanggal_sppd", skip_serializing_if = "Option::is_none")]
    pub date: Option<DocumentDate>,
}

impl DocumentUpdate {
    /// Returns whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.date.is_none()
    }

    /// Returns `document` with this update applied.
    ///
    /// The merged record must still carry a non-blank name and date.
    pub fn merge_into(&self, document: &Document) -> Result<Document> {
        let mut merged = document.clone();
        if let Some(name) = &self.name {
            merged.name = name.trim().to_owned();
        }
        if let Some(category) = self.category {
            merged.category = category;
        }
        if let Some(date) = &self.date {
            merged.date = DocumentDate::new(date.as_str().trim());
        }

        if merged.name.is_empty() {
            return Err(Error::validation("name is required"));
        }
        if merged.date.as_str().is_empty() {
            return Err(Error::validation("date is required"));
        }

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn document() -> Document {
        Document::new(1, "SPPD Bogor", Category::Lampiran, "2024-03-05")
            .with_file_path("uploads/file-1.pdf")
    }

    #[test]
    fn merge_keeps_unset_fields_and_file_path() {
        let update = DocumentUpdate {
            category: Some(Category::Keuangan),
            ..Default::default()
        };
        let merged = update.merge_into(&document()).unwrap();

        assert_eq!(merged.name, "SPPD Bogor");
        assert_eq!(merged.category, Category::Keuangan);
        assert_eq!(merged.file_path.as_deref(), Some("uploads/file-1.pdf"));
    }

    #[test]
    fn blank_fields_fail_validation() {
        let update = DocumentUpdate {
            name: Some("   ".into()),
            ..Default::default()
        };
        let err = update.merge_into(&document()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn accepts_legacy_field_names() {
        let update: DocumentUpdate = serde_json::from_str(
            r#"{"nama_sppd": "Laporan", "kategori": "BKU", "tanggal_sppd": "2024-04-01"}"#,
        )
        .unwrap();

        assert_eq!(update.name.as_deref(), Some("Laporan"));
        assert_eq!(update.category, Some(Category::Bku));
        assert_eq!(update.date, Some(DocumentDate::new("2024-04-01")));
    }
}
