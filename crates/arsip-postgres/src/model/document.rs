//! Document row model.

use diesel::prelude::*;
use jiff_diesel::{Date, Timestamp};

use crate::schema::documents;
use crate::types::DocumentCategory;

/// A stored document row.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Document {
    /// Identity assigned by the database; never reused.
    pub id: i64,
    /// Human-readable title.
    pub name: String,
    /// Category of the document.
    pub category: DocumentCategory,
    /// Calendar date the document refers to.
    pub document_date: Date,
    /// Relative reference to the stored file.
    pub file_path: String,
    /// Timestamp when the row was inserted.
    pub created_at: Timestamp,
}

/// Data for inserting a new document row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocument {
    /// Human-readable title.
    pub name: String,
    /// Category of the document.
    pub category: DocumentCategory,
    /// Calendar date the document refers to.
    pub document_date: Date,
    /// Relative reference to the already stored file.
    pub file_path: String,
}

/// Metadata changes for an existing row.
///
/// Has no `file_path` field: the stored file reference never changes after
/// creation.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateDocument {
    /// New title.
    pub name: Option<String>,
    /// New category.
    pub category: Option<DocumentCategory>,
    /// New document date.
    pub document_date: Option<Date>,
}

impl Document {
    /// Returns the document date as a civil date.
    #[inline]
    pub fn date(&self) -> jiff::civil::Date {
        self.document_date.into()
    }

    /// Returns the creation timestamp.
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}

impl UpdateDocument {
    /// Returns whether the changeset would not touch any column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.document_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_changeset_is_empty() {
        assert!(UpdateDocument::default().is_empty());

        let rename = UpdateDocument {
            name: Some("SPPD Maret".into()),
            ..Default::default()
        };
        assert!(!rename.is_empty());
    }

    #[test]
    fn civil_accessors_round_trip() {
        let date = jiff::civil::date(2024, 3, 5);
        let row = Document {
            id: 1,
            name: "SPPD".into(),
            category: DocumentCategory::Lampiran,
            document_date: date.into(),
            file_path: "uploads/file-1.pdf".into(),
            created_at: jiff::Timestamp::UNIX_EPOCH.into(),
        };

        assert_eq!(row.date(), date);
        assert_eq!(row.created_at(), jiff::Timestamp::UNIX_EPOCH);
    }
}
