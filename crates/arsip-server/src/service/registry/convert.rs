//! Row <-> canonical document conversions.

use arsip_core::document::{Category, Document};
use arsip_postgres::model::Document as DocumentRow;
use arsip_postgres::types::DocumentCategory;

pub(crate) fn category_to_row(category: Category) -> DocumentCategory {
    match category {
        Category::Lampiran => DocumentCategory::Lampiran,
        Category::Keuangan => DocumentCategory::Keuangan,
        Category::Bku => DocumentCategory::Bku,
        Category::Sts => DocumentCategory::Sts,
    }
}

pub(crate) fn category_from_row(category: DocumentCategory) -> Category {
    match category {
        DocumentCategory::Lampiran => Category::Lampiran,
        DocumentCategory::Keuangan => Category::Keuangan,
        DocumentCategory::Bku => Category::Bku,
        DocumentCategory::Sts => Category::Sts,
    }
}

pub(crate) fn document_from_row(row: DocumentRow) -> Document {
    let date = row.date();
    let created_at = row.created_at();

    Document::new(row.id, row.name, category_from_row(row.category), date)
        .with_file_path(row.file_path)
        .with_created_at(created_at)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn categories_map_both_ways() {
        for category in Category::iter() {
            assert_eq!(category_from_row(category_to_row(category)), category);
        }
    }

    #[test]
    fn rows_become_canonical_documents() {
        let row = DocumentRow {
            id: 4,
            name: "BKU Maret".into(),
            category: DocumentCategory::Bku,
            document_date: jiff::civil::date(2024, 3, 31).into(),
            file_path: "uploads/file-4.xlsx".into(),
            created_at: jiff::Timestamp::UNIX_EPOCH.into(),
        };

        let document = document_from_row(row);
        assert_eq!(document.id, 4);
        assert_eq!(document.category, Category::Bku);
        assert_eq!(document.date.as_str(), "2024-03-31");
        assert_eq!(document.stored_file_name(), Some("file-4.xlsx"));
        assert_eq!(document.created_at, Some(jiff::Timestamp::UNIX_EPOCH));
    }
}
