use crate::document::Document;

/// One page of a filtered and sorted listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    /// Documents on this page.
    pub items: Vec<&'a Document>,
    /// Effective 1-based page number after clamping.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Number of documents matching the query across all pages.
    pub total_items: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,
}

impl Page<'_> {
    /// Returns the ids of the documents on this page.
    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(|doc| doc.id).collect()
    }

    /// Returns whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns whether an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Returns `max(1, ceil(total_items / page_size))`.
///
/// A zero page size counts as one row per page.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Slices out the requested page, clamping `page` into `1..=total_pages`.
pub fn paginate(items: Vec<&Document>, page: usize, page_size: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let items = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Category;

    fn documents(count: i64) -> Vec<Document> {
        (1..=count)
            .map(|id| Document::new(id, format!("Doc {id}"), Category::Lampiran, "2024-03-05"))
            .collect()
    }

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let docs = documents(23);
        let page = paginate(docs.iter().collect(), 3, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 23 - 2 * 10);
        assert_eq!(page.ids(), vec![21, 22, 23]);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let docs = documents(23);
        let zero = paginate(docs.iter().collect(), 0, 10);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.ids().first(), Some(&1));

        let beyond = paginate(docs.iter().collect(), 99, 10);
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.items.len(), 3);
    }

    #[test]
    fn empty_listing_has_one_empty_page() {
        let page = paginate(Vec::new(), 4, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }
}
