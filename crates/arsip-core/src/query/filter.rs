use jiff::civil::{Date, DateTime};

use super::DocumentQuery;
use crate::document::{Category, Document};

/// Matches when `search` is a case-insensitive substring of the name or category.
///
/// Empty search text matches everything. The text is used as typed,
/// surrounding whitespace included.
pub fn matches_search(document: &Document, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();

    document.name.to_lowercase().contains(&needle)
        || document.category.as_ref().to_lowercase().contains(&needle)
}

/// Matches when the document date falls within the inclusive bounds.
///
/// The start bound begins at midnight and the end bound runs through
/// 23:59:59.999 of its day. With no bounds everything matches. With any
/// bound, documents whose date cannot be parsed are excluded.
pub fn matches_date_range(document: &Document, start: Option<Date>, end: Option<Date>) -> bool {
    if start.is_none() && end.is_none() {
        return true;
    }

    let Some(date) = document.date.to_datetime() else {
        return false;
    };

    let after_start = start.is_none_or(|start| date >= start.at(0, 0, 0, 0));
    let before_end = end.is_none_or(|end| date <= end_of_day(end));
    after_start && before_end
}

/// Matches when no category is requested or the categories are equal.
pub fn matches_category(document: &Document, category: Option<Category>) -> bool {
    category.is_none_or(|category| document.category == category)
}

/// Keeps the documents matching every dimension of `query`, in input order.
pub fn filter<'a>(documents: &'a [Document], query: &DocumentQuery) -> Vec<&'a Document> {
    documents
        .iter()
        .filter(|document| matches_search(document, &query.search))
        .filter(|document| matches_date_range(document, query.date_start, query.date_end))
        .filter(|document| matches_category(document, query.category))
        .collect()
}

fn end_of_day(date: Date) -> DateTime {
    date.at(23, 59, 59, 999_000_000)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn documents() -> Vec<Document> {
        vec![
            Document::new(1, "SPPD Bogor", Category::Lampiran, "2024-03-05"),
            Document::new(2, "Laporan Kas", Category::Bku, "2024-03-10 16:45:00"),
            Document::new(3, "Setoran Pajak", Category::Sts, "2024-03-15"),
            Document::new(4, "Kwitansi", Category::Keuangan, "bukan tanggal"),
        ]
    }

    fn ids(matched: &[&Document]) -> Vec<i64> {
        matched.iter().map(|doc| doc.id).collect()
    }

    #[test]
    fn search_matches_name_or_category() {
        let docs = documents();
        assert!(matches_search(&docs[0], "bogor"));
        assert!(matches_search(&docs[1], "bku"));
        assert!(matches_search(&docs[2], "PAJAK"));
        assert!(!matches_search(&docs[0], "jakarta"));
        assert!(matches_search(&docs[0], ""));
    }

    #[test]
    fn search_text_is_not_trimmed() {
        let docs = documents();
        assert!(matches_search(&docs[0], " "));
        assert!(!matches_search(&docs[3], " "));
        assert!(!matches_search(&docs[2], "  PAJAK "));
        assert!(matches_search(&docs[2], "n pajak"));
    }

    #[test]
    fn end_bound_includes_the_whole_day() {
        let docs = documents();
        let day = Some(date(2024, 3, 10));
        assert!(matches_date_range(&docs[1], day, day));
        assert!(!matches_date_range(&docs[1], Some(date(2024, 3, 11)), None));
        assert!(matches_date_range(&docs[1], None, day));
    }

    #[test]
    fn open_ended_ranges() {
        let docs = documents();
        let query = DocumentQuery::new().with_date_range(Some(date(2024, 3, 10)), None);
        assert_eq!(ids(&filter(&docs, &query)), vec![2, 3]);

        let query = DocumentQuery::new().with_date_range(None, Some(date(2024, 3, 9)));
        assert_eq!(ids(&filter(&docs, &query)), vec![1]);
    }

    #[test]
    fn unparseable_dates_only_survive_without_bounds() {
        let docs = documents();
        assert!(matches_date_range(&docs[3], None, None));
        assert!(!matches_date_range(&docs[3], Some(date(1900, 1, 1)), None));
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let docs = documents();
        assert_eq!(ids(&filter(&docs, &DocumentQuery::new())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn dimensions_compose_as_intersection() {
        let docs = documents();
        let query = DocumentQuery::new()
            .with_search("a")
            .with_date_range(Some(date(2024, 3, 1)), Some(date(2024, 3, 12)))
            .with_category(Some(Category::Bku));

        let combined = ids(&filter(&docs, &query));
        let independent: Vec<i64> = docs
            .iter()
            .filter(|doc| matches_search(doc, &query.search))
            .filter(|doc| matches_date_range(doc, query.date_start, query.date_end))
            .filter(|doc| matches_category(doc, query.category))
            .map(|doc| doc.id)
            .collect();

        assert_eq!(combined, independent);
        assert_eq!(combined, vec![2]);
    }
}
