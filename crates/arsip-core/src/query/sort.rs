use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::document::Document;

/// Ordering by document date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    /// Latest date first.
    Newest,
    /// Earliest date first.
    Oldest,
}

/// Sorts in place by document date; `None` leaves the order untouched.
///
/// The sort is stable, so documents with equal dates keep their relative
/// input order in both directions. Unparseable dates use the epoch fallback.
pub fn sort(documents: &mut [&Document], order: Option<SortOrder>) {
    match order {
        None => {}
        Some(SortOrder::Oldest) => documents.sort_by_cached_key(|doc| doc.date.sort_key()),
        Some(SortOrder::Newest) => {
            documents.sort_by_cached_key(|doc| std::cmp::Reverse(doc.date.sort_key()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Category;

    fn documents() -> Vec<Document> {
        vec![
            Document::new(1, "A", Category::Lampiran, "2024-03-10"),
            Document::new(2, "B", Category::Lampiran, "2024-03-05"),
            Document::new(3, "C", Category::Lampiran, "2024-03-10"),
            Document::new(4, "D", Category::Lampiran, "rusak"),
            Document::new(5, "E", Category::Lampiran, "2024-03-10"),
        ]
    }

    fn sorted(order: Option<SortOrder>) -> Vec<i64> {
        let docs = documents();
        let mut refs: Vec<&Document> = docs.iter().collect();
        sort(&mut refs, order);
        refs.iter().map(|doc| doc.id).collect()
    }

    #[test]
    fn equal_dates_keep_input_order() {
        assert_eq!(sorted(Some(SortOrder::Newest)), vec![1, 3, 5, 2, 4]);
        assert_eq!(sorted(Some(SortOrder::Oldest)), vec![4, 2, 1, 3, 5]);
    }

    #[test]
    fn no_order_preserves_input() {
        assert_eq!(sorted(None), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn parses_lowercase_labels() {
        assert_eq!("newest".parse::<SortOrder>().ok(), Some(SortOrder::Newest));
        assert_eq!(SortOrder::Oldest.to_string(), "oldest");
    }
}
