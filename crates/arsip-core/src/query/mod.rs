//! Filter, sort and paginate over an in-memory document list.
//!
//! [`DocumentQuery::apply`] is a pure function of its inputs: filters
//! compose with logical AND, sorting is stable, and out-of-range pages are
//! clamped instead of rejected.

mod filter;
mod page;
mod sort;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

pub use self::filter::{filter, matches_category, matches_date_range, matches_search};
pub use self::page::{Page, paginate, total_pages};
pub use self::sort::{SortOrder, sort};
use crate::document::{Category, Document};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Transient listing query owned by the client session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentQuery {
    /// Case-insensitive substring matched against name and category.
    pub search: String,
    /// Inclusive lower bound, from midnight.
    pub date_start: Option<Date>,
    /// Inclusive upper bound, through the last millisecond of the day.
    pub date_end: Option<Date>,
    /// Exact category match.
    pub category: Option<Category>,
    /// Ordering by document date; `None` keeps storage order.
    pub sort: Option<SortOrder>,
    /// 1-based page number.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl Default for DocumentQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            date_start: None,
            date_end: None,
            category: None,
            sort: Some(SortOrder::Newest),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DocumentQuery {
    /// Creates the default query: newest first, first page of ten.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets both date bounds.
    pub fn with_date_range(mut self, start: Option<Date>, end: Option<Date>) -> Self {
        self.date_start = start;
        self.date_end = end;
        self
    }

    /// Sets the category filter.
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Sets the sort order.
    pub fn with_sort(mut self, sort: Option<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the requested page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Returns whether any filter dimension is constrained.
    pub fn has_filters(&self) -> bool {
        !self.search.is_empty()
            || self.date_start.is_some()
            || self.date_end.is_some()
            || self.category.is_some()
    }

    /// Returns whether a date bound is set.
    pub fn has_date_range(&self) -> bool {
        self.date_start.is_some() || self.date_end.is_some()
    }

    /// Clears every filter dimension, keeping sort and page size.
    pub fn reset_filters(&mut self) {
        self.search.clear();
        self.date_start = None;
        self.date_end = None;
        self.category = None;
    }

    /// Filters and sorts, without paginating.
    pub fn matching<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        let mut matched = filter(documents, self);
        sort(&mut matched, self.sort);
        matched
    }

    /// Filters, sorts and returns the requested page.
    pub fn apply<'a>(&self, documents: &'a [Document]) -> Page<'a> {
        paginate(self.matching(documents), self.page, self.page_size)
    }
}
