#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Closed set of document categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[strum(ascii_case_insensitive)]
pub enum Category {
    /// Supporting attachments.
    Lampiran,
    /// Financial records.
    Keuangan,
    /// General cash book.
    #[serde(rename = "BKU")]
    #[strum(serialize = "BKU")]
    Bku,
    /// Deposit slips.
    #[serde(rename = "STS")]
    #[strum(serialize = "STS")]
    Sts,
}

impl Category {
    /// Parses a category label, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for empty or unknown labels.
    pub fn parse_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(Category::parse_label(" keuangan "), Some(Category::Keuangan));
        assert_eq!(Category::parse_label("bku"), Some(Category::Bku));
        assert_eq!(Category::parse_label("STS"), Some(Category::Sts));
        assert_eq!(Category::parse_label(""), None);
        assert_eq!(Category::parse_label("Lainnya"), None);
    }

    #[test]
    fn display_round_trips() {
        for category in Category::iter() {
            assert_eq!(Category::parse_label(category.as_ref()), Some(category));
        }
    }
}
