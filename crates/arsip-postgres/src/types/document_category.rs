//! Document category enumeration.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Category of an archived document.
///
/// Corresponds to the `DOCUMENT_CATEGORY` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[ExistingTypePath = "crate::schema::sql_types::DocumentCategory"]
pub enum DocumentCategory {
    /// Supporting attachments.
    #[db_rename = "lampiran"]
    #[serde(rename = "Lampiran")]
    #[strum(serialize = "Lampiran")]
    Lampiran,

    /// Financial records.
    #[db_rename = "keuangan"]
    #[serde(rename = "Keuangan")]
    #[strum(serialize = "Keuangan")]
    Keuangan,

    /// General cash book (buku kas umum).
    #[db_rename = "bku"]
    #[serde(rename = "BKU")]
    #[strum(serialize = "BKU")]
    Bku,

    /// Deposit slips (surat tanda setoran).
    #[db_rename = "sts"]
    #[serde(rename = "STS")]
    #[strum(serialize = "STS")]
    Sts,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn display_and_parse_agree() {
        for category in DocumentCategory::iter() {
            let parsed: DocumentCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn display_names_match_the_ui_labels() {
        assert_eq!(DocumentCategory::Lampiran.to_string(), "Lampiran");
        assert_eq!(DocumentCategory::Bku.to_string(), "BKU");
        assert!("bku".parse::<DocumentCategory>().is_err());
    }
}
