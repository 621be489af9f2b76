//! Dashboard state container.
//!
//! [`DashboardState`] holds everything the document table needs: the full
//! document list, the current query, the selection and the in-flight flags.
//! All changes go through [`DashboardState::apply`], which takes an
//! [`Action`] and may return a [`Notice`] for the user. The table itself is
//! derived on demand with [`DashboardState::view`].

mod notice;

use jiff::civil::Date;

pub use self::notice::{Notice, NoticeLevel};
use crate::bulk::BulkDeleteReport;
use crate::document::{Category, Document};
use crate::query::{DocumentQuery, Page, SortOrder, total_pages};
use crate::{Selection, SelectionState, TRACING_TARGET_DASHBOARD};

/// Identifies one load request.
///
/// Only the response to the most recent request is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// State transitions accepted by [`DashboardState::apply`].
#[derive(Debug)]
pub enum Action {
    /// The document list arrived.
    Loaded {
        ticket: LoadTicket,
        documents: Vec<Document>,
    },
    /// Fetching the document list failed.
    LoadFailed { ticket: LoadTicket },
    Search(String),
    DateRange {
        start: Option<Date>,
        end: Option<Date>,
    },
    Category(Option<Category>),
    Sort(Option<SortOrder>),
    /// Changes rows per page and returns to the first page.
    PageSize(usize),
    /// Moves to a page; requests outside `1..=total_pages` are ignored.
    GoToPage(usize),
    ToggleOne(i64),
    /// Selects or deselects every row on the visible page.
    ToggleAllVisible(bool),
    /// Resets every filter and clears the selection.
    Refresh,
    DocumentCreated(Document),
    /// The registry accepted an update; the returned record replaces the local one.
    DocumentUpdated(Document),
    UpdateFailed,
    DocumentDeleted(i64),
    DeleteFailed,
    BulkDeleteFinished(BulkDeleteReport),
}

/// Everything the document table is rendered from.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Full, unfiltered list in storage order.
    pub documents: Vec<Document>,
    pub query: DocumentQuery,
    pub selection: Selection,
    /// A list request is in flight.
    pub loading: bool,
    /// A delete is in flight; further deletes are refused.
    pub busy: bool,
    last_ticket: u64,
}

impl DashboardState {
    /// Creates an empty state with the default query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a list request and returns the ticket its response must carry.
    ///
    /// Any ticket handed out earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.last_ticket += 1;
        self.loading = true;
        LoadTicket(self.last_ticket)
    }

    /// Returns whether `ticket` belongs to the latest load request.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.last_ticket
    }

    /// Applies one transition.
    pub fn apply(&mut self, action: Action) -> Option<Notice> {
        let notice = match action {
            Action::Loaded { ticket, documents } => {
                if !self.is_current(ticket) {
                    tracing::debug!(
                        target: TRACING_TARGET_DASHBOARD,
                        ticket = ticket.0,
                        "Discarding stale document list"
                    );
                    return None;
                }
                self.loading = false;
                self.documents = documents;
                let known = &self.documents;
                self.selection
                    .retain_known(|id| known.iter().any(|doc| doc.id == id));
                None
            }
            Action::LoadFailed { ticket } => {
                if !self.is_current(ticket) {
                    return None;
                }
                self.loading = false;
                Some(Notice::LoadFailed)
            }
            Action::Search(search) => {
                self.query.search = search;
                self.query.page = 1;
                let searched = !self.query.search.is_empty();
                (searched && self.matching_count() == 0).then_some(Notice::NoSearchMatches)
            }
            Action::DateRange { start, end } => {
                self.query.date_start = start;
                self.query.date_end = end;
                self.query.page = 1;
                (self.query.has_date_range() && self.matching_count() == 0)
                    .then_some(Notice::NoDocumentsInRange)
            }
            Action::Category(category) => {
                self.query.category = category;
                self.query.page = 1;
                None
            }
            Action::Sort(sort) => {
                self.query.sort = sort;
                None
            }
            Action::PageSize(page_size) => {
                self.query.page_size = page_size.max(1);
                self.query.page = 1;
                None
            }
            Action::GoToPage(page) => {
                if (1..=self.total_pages()).contains(&page) {
                    self.query.page = page;
                }
                None
            }
            Action::ToggleOne(id) => {
                self.selection.toggle_one(id);
                None
            }
            Action::ToggleAllVisible(checked) => {
                let visible = self.visible_ids();
                self.selection.toggle_all_visible(checked, &visible);
                None
            }
            Action::Refresh => {
                self.query.reset_filters();
                self.query.page = 1;
                self.selection.clear();
                Some(Notice::FiltersReset)
            }
            Action::DocumentCreated(document) => {
                self.documents.push(document);
                Some(Notice::Uploaded)
            }
            Action::DocumentUpdated(document) => {
                match self.documents.iter_mut().find(|doc| doc.id == document.id) {
                    Some(existing) => *existing = document,
                    None => self.documents.push(document),
                }
                Some(Notice::Updated)
            }
            Action::UpdateFailed => Some(Notice::UpdateFailed),
            Action::DocumentDeleted(id) => {
                self.busy = false;
                self.remove_documents(&[id]);
                Some(Notice::Deleted)
            }
            Action::DeleteFailed => {
                self.busy = false;
                Some(Notice::DeleteFailed)
            }
            Action::BulkDeleteFinished(report) => {
                self.busy = false;
                let deleted = report.deleted_ids();
                self.remove_documents(&deleted);

                let failed = report.failed_count();
                Some(match (deleted.len(), failed) {
                    (count, 0) => Notice::BulkDeleted { count },
                    (0, _) => Notice::DeleteFailed,
                    (deleted, failed) => Notice::BulkDeletePartial { deleted, failed },
                })
            }
        };

        self.clamp_page();
        notice
    }

    /// Returns the visible page.
    pub fn view(&self) -> Page<'_> {
        self.query.apply(&self.documents)
    }

    /// Ids on the visible page.
    pub fn visible_ids(&self) -> Vec<i64> {
        self.view().ids()
    }

    /// Header checkbox flags for the visible page.
    pub fn selection_state(&self) -> SelectionState {
        self.selection.state(&self.visible_ids())
    }

    /// Number of pages for the current filters.
    pub fn total_pages(&self) -> usize {
        total_pages(self.matching_count(), self.query.page_size)
    }

    /// Ids of all loaded documents in storage order.
    pub fn document_ids(&self) -> Vec<i64> {
        self.documents.iter().map(|doc| doc.id).collect()
    }

    /// Looks up a loaded document.
    pub fn document(&self, id: i64) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    fn matching_count(&self) -> usize {
        crate::query::filter(&self.documents, &self.query).len()
    }

    fn remove_documents(&mut self, ids: &[i64]) {
        self.documents.retain(|doc| !ids.contains(&doc.id));
        self.selection.remove_many(ids);
    }

    fn clamp_page(&mut self) {
        self.query.page = self.query.page.clamp(1, self.total_pages());
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::bulk::DeleteOutcome;
    use crate::{Error, ErrorKind};

    fn documents(count: i64) -> Vec<Document> {
        (1..=count)
            .map(|id| {
                let day = (id % 28 + 1) as i8;
                Document::new(id, format!("SPPD {id}"), Category::Lampiran, date(2024, 3, day))
            })
            .collect()
    }

    fn loaded(count: i64) -> DashboardState {
        let mut state = DashboardState::new();
        let ticket = state.begin_load();
        state.apply(Action::Loaded {
            ticket,
            documents: documents(count),
        });
        state
    }

    #[test]
    fn defaults_are_newest_first_ten_per_page() {
        let state = loaded(25);
        assert_eq!(state.query.sort, Some(SortOrder::Newest));
        assert_eq!(state.view().items.len(), 10);
        assert_eq!(state.total_pages(), 3);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut state = DashboardState::new();
        let first = state.begin_load();
        let second = state.begin_load();

        state.apply(Action::Loaded {
            ticket: second,
            documents: documents(2),
        });
        state.apply(Action::Loaded {
            ticket: first,
            documents: documents(5),
        });
        assert_eq!(state.documents.len(), 2);
        assert!(!state.loading);

        assert_eq!(state.apply(Action::LoadFailed { ticket: first }), None);
    }

    #[test]
    fn load_failure_keeps_previous_documents() {
        let mut state = loaded(3);
        let ticket = state.begin_load();
        assert_eq!(state.apply(Action::LoadFailed { ticket }), Some(Notice::LoadFailed));
        assert_eq!(state.documents.len(), 3);
        assert!(!state.loading);
    }

    #[test]
    fn selection_persists_across_pages() {
        let mut state = loaded(25);
        let first_page = state.visible_ids();
        state.apply(Action::ToggleOne(first_page[0]));

        state.apply(Action::GoToPage(2));
        assert_eq!(state.query.page, 2);
        state.apply(Action::ToggleAllVisible(true));
        assert!(state.selection_state().all_selected);

        state.apply(Action::GoToPage(1));
        assert!(state.selection.contains(first_page[0]));
        assert_eq!(state.selection.len(), 11);
        assert!(state.selection_state().some_selected);
    }

    #[test]
    fn go_to_page_ignores_out_of_range() {
        let mut state = loaded(25);
        state.apply(Action::GoToPage(0));
        assert_eq!(state.query.page, 1);
        state.apply(Action::GoToPage(4));
        assert_eq!(state.query.page, 1);
        state.apply(Action::GoToPage(3));
        assert_eq!(state.query.page, 3);
    }

    #[test]
    fn page_size_change_resets_to_first_page() {
        let mut state = loaded(25);
        state.apply(Action::GoToPage(3));
        state.apply(Action::PageSize(25));
        assert_eq!(state.query.page, 1);
        assert_eq!(state.total_pages(), 1);
    }

    #[test]
    fn page_is_clamped_when_the_list_shrinks() {
        let mut state = loaded(25);
        state.apply(Action::GoToPage(3));

        let report = BulkDeleteReport {
            outcomes: (1..=10).map(|id| DeleteOutcome { id, result: Ok(()) }).collect(),
        };
        state.apply(Action::BulkDeleteFinished(report));
        assert_eq!(state.documents.len(), 15);
        assert_eq!(state.query.page, 2);
    }

    #[test]
    fn empty_search_results_emit_a_notice() {
        let mut state = loaded(5);
        assert_eq!(
            state.apply(Action::Search("tidak ada".into())),
            Some(Notice::NoSearchMatches)
        );
        assert_eq!(state.view().total_pages, 1);
        assert_eq!(state.apply(Action::Search(String::new())), None);
    }

    #[test]
    fn empty_date_range_emits_a_notice() {
        let mut state = loaded(5);
        let notice = state.apply(Action::DateRange {
            start: Some(date(2025, 1, 1)),
            end: None,
        });
        assert_eq!(notice, Some(Notice::NoDocumentsInRange));
    }

    #[test]
    fn refresh_resets_filters_and_selection() {
        let mut state = loaded(5);
        state.apply(Action::Search("SPPD 1".into()));
        state.apply(Action::Category(Some(Category::Lampiran)));
        state.apply(Action::ToggleOne(1));

        assert_eq!(state.apply(Action::Refresh), Some(Notice::FiltersReset));
        assert!(!state.query.has_filters());
        assert!(state.selection.is_empty());
        assert_eq!(state.view().total_items, 5);
    }

    #[test]
    fn updates_replace_the_local_record() {
        let mut state = loaded(2);
        let mut changed = state.document(2).cloned().unwrap();
        changed.category = Category::Sts;

        assert_eq!(state.apply(Action::DocumentUpdated(changed)), Some(Notice::Updated));
        assert_eq!(state.document(2).map(|doc| doc.category), Some(Category::Sts));
        assert_eq!(state.documents.len(), 2);
    }

    #[test]
    fn bulk_outcomes_map_to_notices() {
        let mut state = loaded(3);
        let failure = || Err(Error::new(ErrorKind::Persistence));
        let report = BulkDeleteReport {
            outcomes: vec![
                DeleteOutcome { id: 1, result: failure() },
                DeleteOutcome { id: 2, result: failure() },
            ],
        };
        assert_eq!(state.apply(Action::BulkDeleteFinished(report)), Some(Notice::DeleteFailed));
        assert_eq!(state.documents.len(), 3);
    }

    #[test]
    fn reload_drops_selection_of_vanished_ids() {
        let mut state = loaded(5);
        state.apply(Action::ToggleOne(5));
        state.apply(Action::ToggleOne(1));

        let ticket = state.begin_load();
        state.apply(Action::Loaded {
            ticket,
            documents: documents(3),
        });
        assert_eq!(state.selection.to_vec(), vec![1]);
    }
}
