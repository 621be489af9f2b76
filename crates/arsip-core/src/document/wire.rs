//! Translation of incoming record shapes into [`Document`].
//!
//! The registry API has gone through several field spellings: `nama_sppd`,
//! `kategori` and `tanggal_sppd` in the Indonesian schema, `name`,
//! `category` and `date` in the current one, plus a listing shape that
//! carried `format` and `size` and sometimes a string id. All of them are
//! accepted here and nowhere else.

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::Deserialize;

use super::{Category, Document, DocumentDate};
use crate::{Error, Result, TRACING_TARGET_WIRE, dates};

/// Any record shape the registry has produced.
#[derive(Debug, Clone, Deserialize)]
pub struct WireDocument {
    id: WireId,
    #[serde(default, alias = "nama_sppd")]
    name: Option<String>,
    #[serde(default, alias = "kategori")]
    category: Option<String>,
    #[serde(default, alias = "tanggal_sppd")]
    date: Option<String>,
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

impl TryFrom<WireId> for i64 {
    type Error = Error;

    fn try_from(id: WireId) -> Result<Self> {
        match id {
            WireId::Number(id) => Ok(id),
            WireId::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| Error::validation(format!("document id '{text}' is not a number"))),
        }
    }
}

impl TryFrom<WireDocument> for Document {
    type Error = Error;

    fn try_from(wire: WireDocument) -> Result<Self> {
        let id = i64::try_from(wire.id)?;

        let name = required(wire.name, "name")?;
        let category = required(wire.category, "category")?;
        let category = Category::parse_label(&category)
            .ok_or_else(|| Error::validation(format!("unknown category '{category}'")))?;
        let date = required(wire.date, "date")?;

        let created_at = wire.created_at.as_deref().and_then(parse_created_at);
        let file_path = wire.file_path.filter(|path| !path.trim().is_empty());

        Ok(Self {
            id,
            name,
            category,
            date: DocumentDate::new(date),
            file_path,
            created_at,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::validation(format!("{field} is required")))
}

fn parse_created_at(value: &str) -> Option<Timestamp> {
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Some(timestamp);
    }

    let timestamp = dates::parse_document_date(value)
        .and_then(|datetime| datetime.to_zoned(TimeZone::system()).ok())
        .map(|zoned| zoned.timestamp());

    if timestamp.is_none() {
        tracing::warn!(target: TRACING_TARGET_WIRE, created_at = value, "Ignoring unparseable creation timestamp");
    }

    timestamp
}

/// Decodes a JSON array of records, skipping the ones that cannot be translated.
///
/// Returns an error only if `json` is not an array.
pub fn decode_documents(json: &str) -> Result<Vec<Document>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let total = records.len();

    let documents: Vec<Document> = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Document>(record) {
            Ok(document) => Some(document),
            Err(err) => {
                tracing::warn!(target: TRACING_TARGET_WIRE, error = %err, "Skipping malformed document record");
                None
            }
        })
        .collect();

    if documents.len() < total {
        tracing::warn!(
            target: TRACING_TARGET_WIRE,
            total,
            skipped = total - documents.len(),
            "Some document records were skipped"
        );
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_the_indonesian_schema() {
        let doc: Document = serde_json::from_value(json!({
            "id": 12,
            "nama_sppd": "Perjalanan Dinas Bogor",
            "kategori": "Keuangan",
            "tanggal_sppd": "2024-03-05",
            "file_path": "uploads/file-1709600000000-123456789.pdf",
            "created_at": "2024-03-05T03:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(doc.id, 12);
        assert_eq!(doc.name, "Perjalanan Dinas Bogor");
        assert_eq!(doc.category, Category::Keuangan);
        assert_eq!(doc.date.as_str(), "2024-03-05");
        assert_eq!(
            doc.created_at,
            Some("2024-03-05T03:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn accepts_the_listing_shape_with_string_ids() {
        let doc: Document = serde_json::from_value(json!({
            "id": "7",
            "name": "Rekap BKU",
            "format": "PDF",
            "size": "1.2 MB",
            "date": "5 Maret 2024",
            "category": "bku"
        }))
        .unwrap();

        assert_eq!(doc.id, 7);
        assert_eq!(doc.category, Category::Bku);
        assert_eq!(doc.file_path, None);
        assert_eq!(doc.date.to_date(), Some(jiff::civil::date(2024, 3, 5)));
    }

    #[test]
    fn rejects_missing_or_unknown_fields() {
        let missing_category = serde_json::from_value::<Document>(json!({
            "id": 1, "name": "A", "date": "2024-03-05"
        }));
        assert!(missing_category.is_err());

        let unknown_category = serde_json::from_value::<Document>(json!({
            "id": 1, "name": "A", "date": "2024-03-05", "category": "Lainnya"
        }));
        assert!(unknown_category.is_err());

        let blank_name = serde_json::from_value::<Document>(json!({
            "id": 1, "name": "  ", "date": "2024-03-05", "category": "Lampiran"
        }));
        assert!(blank_name.is_err());

        let bad_id = serde_json::from_value::<Document>(json!({
            "id": "abc", "name": "A", "date": "2024-03-05", "category": "Lampiran"
        }));
        assert!(bad_id.is_err());
    }

    #[test]
    fn keeps_unparseable_dates_verbatim() {
        let doc: Document = serde_json::from_value(json!({
            "id": 1, "name": "A", "date": "sometime", "category": "Lampiran"
        }))
        .unwrap();
        assert_eq!(doc.date.as_str(), "sometime");
        assert_eq!(doc.date.to_date(), None);
    }

    #[test]
    fn decode_skips_malformed_records() {
        let json = r#"[
            {"id": 1, "nama_sppd": "A", "kategori": "Lampiran", "tanggal_sppd": "2024-03-05"},
            {"id": 2, "nama_sppd": "B"},
            {"id": 3, "name": "C", "category": "STS", "date": "2024-03-07"}
        ]"#;

        let documents = decode_documents(json).unwrap();
        let ids: Vec<i64> = documents.iter().map(|doc| doc.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(decode_documents(r#"{"id": 1}"#).is_err());
    }
}
