//! Document request types.

use arsip_core::document::{Category, DocumentUpdate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handler::{ErrorKind, Result};

/// Request payload for editing document metadata.
///
/// Fields left out keep their stored value. Both the current and the
/// older field names are accepted.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct UpdateDocument {
    /// New title of the document.
    #[serde(default, alias = "nama_sppd")]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// New category: `Lampiran`, `Keuangan`, `BKU` or `STS`, any case.
    #[serde(default, alias = "kategori")]
    pub category: Option<String>,
    /// New document date, preferably `YYYY-MM-DD`.
    #[serde(default, alias = "tanggal_sppd")]
    #[validate(length(min = 1, max = 64))]
    pub date: Option<String>,
}

impl UpdateDocument {
    /// Converts this request into a registry update.
    pub fn into_update(self) -> Result<DocumentUpdate> {
        let category = match self.category {
            Some(label) => Some(Category::parse_label(&label).ok_or_else(|| {
                ErrorKind::BadRequest
                    .with_message(format!("Unknown category '{}'", label.trim()))
                    .with_resource("category")
            })?),
            None => None,
        };

        Ok(DocumentUpdate {
            name: self.name,
            category,
            date: self.date.map(Into::into),
        })
    }
}

/// Request payload for deleting several documents at once.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct BulkDeleteDocuments {
    /// Identifiers of the documents to delete.
    #[validate(length(min = 1, max = 1000, message = "Select at least one document"))]
    pub ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_field_names_are_accepted() -> anyhow::Result<()> {
        let request: UpdateDocument = serde_json::from_str(
            r#"{"nama_sppd": "SPPD Bandung", "kategori": "Keuangan", "tanggal_sppd": "2024-03-05"}"#,
        )?;

        let update = request.into_update()?;
        assert_eq!(update.name.as_deref(), Some("SPPD Bandung"));
        assert_eq!(update.category, Some(Category::Keuangan));
        assert_eq!(update.date.as_ref().map(|d| d.as_str()), Some("2024-03-05"));
        Ok(())
    }

    #[test]
    fn category_labels_ignore_case() -> anyhow::Result<()> {
        let request = UpdateDocument {
            category: Some("bku".into()),
            ..Default::default()
        };
        assert_eq!(request.into_update()?.category, Some(Category::Bku));

        let request = UpdateDocument {
            category: Some("Lainnya".into()),
            ..Default::default()
        };
        let error = request.into_update().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("category"));
        Ok(())
    }

    #[test]
    fn empty_name_fails_validation() {
        let request = UpdateDocument {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
        assert!(UpdateDocument::default().validate().is_ok());
    }

    #[test]
    fn bulk_delete_needs_ids() {
        assert!(BulkDeleteDocuments::default().validate().is_err());
        assert!(BulkDeleteDocuments { ids: vec![1, 2] }.validate().is_ok());
    }
}
