//! Bulk deletion with per-id outcome tracking.
//!
//! Deletes run one id at a time in ascending order and never stop at the
//! first failure, so a single bad id cannot hide the outcome of the rest.

use async_trait::async_trait;

use crate::dashboard::{Action, DashboardState, Notice};
use crate::{Error, Result, Selection, TRACING_TARGET_BULK};

/// Remote side of the registry as seen by the dashboard.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Deletes a single document and its stored file.
    async fn delete_document(&self, id: i64) -> Result<()>;
}

#[async_trait]
impl<T: DocumentService + ?Sized> DocumentService for std::sync::Arc<T> {
    async fn delete_document(&self, id: i64) -> Result<()> {
        (**self).delete_document(id).await
    }
}

/// Result of deleting one id.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub id: i64,
    pub result: Result<()>,
}

impl DeleteOutcome {
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-id outcomes of a bulk delete, in dispatch order.
#[derive(Debug, Default)]
pub struct BulkDeleteReport {
    pub outcomes: Vec<DeleteOutcome>,
}

impl BulkDeleteReport {
    /// Ids that were deleted.
    pub fn deleted_ids(&self) -> Vec<i64> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_deleted())
            .map(|outcome| outcome.id)
            .collect()
    }

    /// Ids that failed together with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (i64, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|err| (outcome.id, err)))
    }

    /// Ids that failed.
    pub fn failed_ids(&self) -> Vec<i64> {
        self.failures().map(|(id, _)| id).collect()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn deleted_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_deleted()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.deleted_count()
    }

    /// Returns whether every requested id was deleted.
    pub fn is_complete(&self) -> bool {
        self.failed_count() == 0
    }

    /// Human-readable summary, e.g. `8 of 10 deleted, 2 failed`.
    pub fn summary(&self) -> String {
        format!(
            "{} of {} deleted, {} failed",
            self.deleted_count(),
            self.total(),
            self.failed_count()
        )
    }
}

/// Deletes each id in turn, collecting one outcome per id.
pub async fn delete_many<S>(service: &S, ids: &[i64]) -> BulkDeleteReport
where
    S: DocumentService + ?Sized,
{
    let mut outcomes = Vec::with_capacity(ids.len());

    for &id in ids {
        let result = service.delete_document(id).await;
        if let Err(err) = &result {
            tracing::warn!(
                target: TRACING_TARGET_BULK,
                id,
                error = %err,
                "Failed to delete document"
            );
        }
        outcomes.push(DeleteOutcome { id, result });
    }

    let report = BulkDeleteReport { outcomes };
    tracing::info!(
        target: TRACING_TARGET_BULK,
        summary = %report.summary(),
        "Bulk delete finished"
    );
    report
}

/// Deletes every selected id.
///
/// An empty selection is rejected with [`ErrorKind::NoSelection`] before any
/// call reaches the service.
///
/// [`ErrorKind::NoSelection`]: crate::ErrorKind::NoSelection
pub async fn bulk_delete<S>(service: &S, selection: &Selection) -> Result<BulkDeleteReport>
where
    S: DocumentService + ?Sized,
{
    if selection.is_empty() {
        return Err(Error::no_selection());
    }

    Ok(delete_many(service, &selection.to_vec()).await)
}

/// Runs a bulk delete of the current selection and folds the outcome into `state`.
pub async fn delete_selected<S>(state: &mut DashboardState, service: &S) -> Option<Notice>
where
    S: DocumentService + ?Sized,
{
    if state.busy {
        return Some(Notice::Busy);
    }
    if state.selection.is_empty() {
        return Some(Notice::NoSelection);
    }

    state.busy = true;
    let report = delete_many(service, &state.selection.to_vec()).await;
    state.apply(Action::BulkDeleteFinished(report))
}

/// Deletes one document and folds the outcome into `state`.
pub async fn delete_one<S>(state: &mut DashboardState, service: &S, id: i64) -> Option<Notice>
where
    S: DocumentService + ?Sized,
{
    if state.busy {
        return Some(Notice::Busy);
    }

    state.busy = true;
    match service.delete_document(id).await {
        Ok(()) => state.apply(Action::DocumentDeleted(id)),
        Err(err) => {
            tracing::warn!(target: TRACING_TARGET_BULK, id, error = %err, "Failed to delete document");
            state.apply(Action::DeleteFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    use super::*;
    use crate::ErrorKind;
    use crate::document::{Category, Document};

    /// Records calls and fails for a fixed set of ids.
    #[derive(Default)]
    struct FakeService {
        failing: BTreeSet<i64>,
        calls: Mutex<Vec<i64>>,
    }

    impl FakeService {
        fn failing(ids: impl IntoIterator<Item = i64>) -> Self {
            Self {
                failing: ids.into_iter().collect(),
                calls: Mutex::default(),
            }
        }

        fn calls(&self) -> Vec<i64> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentService for FakeService {
        async fn delete_document(&self, id: i64) -> Result<()> {
            self.calls.lock().unwrap().push(id);
            if self.failing.contains(&id) {
                return Err(Error::new(ErrorKind::Persistence).with_message("store offline"));
            }
            Ok(())
        }
    }

    fn loaded_state(count: i64) -> DashboardState {
        let documents = (1..=count)
            .map(|id| Document::new(id, format!("Doc {id}"), Category::Lampiran, "2024-03-05"))
            .collect();
        let mut state = DashboardState::new();
        let ticket = state.begin_load();
        state.apply(Action::Loaded { ticket, documents });
        state
    }

    #[tokio::test]
    async fn partial_failure_keeps_going() {
        let service = FakeService::failing([3, 7]);
        let ids: Vec<i64> = (1..=10).collect();

        let report = delete_many(&service, &ids).await;

        assert_eq!(service.calls(), ids);
        assert_eq!(report.deleted_count(), 8);
        assert_eq!(report.failed_ids(), vec![3, 7]);
        assert_eq!(report.summary(), "8 of 10 deleted, 2 failed");
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn empty_selection_never_reaches_the_service() {
        let service = FakeService::default();
        let err = bulk_delete(&service, &Selection::new()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NoSelection);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_selected_removes_only_successes() {
        let service = FakeService::failing([2]);
        let mut state = loaded_state(4);
        state.apply(Action::ToggleOne(1));
        state.apply(Action::ToggleOne(2));
        state.apply(Action::ToggleOne(4));

        let notice = delete_selected(&mut state, &service).await;

        assert_eq!(notice, Some(Notice::BulkDeletePartial { deleted: 2, failed: 1 }));
        assert_eq!(state.document_ids(), vec![2, 3]);
        assert_eq!(state.selection.to_vec(), vec![2]);
        assert!(!state.busy);
    }

    #[tokio::test]
    async fn delete_selected_without_selection_warns() {
        let service = FakeService::default();
        let mut state = loaded_state(2);

        assert_eq!(delete_selected(&mut state, &service).await, Some(Notice::NoSelection));
        assert!(service.calls().is_empty());
        assert_eq!(state.document_ids(), vec![1, 2]);
    }

    #[tokio::test]
    async fn delete_one_updates_list_and_selection() {
        let service = FakeService::failing([9]);
        let mut state = loaded_state(3);
        state.apply(Action::ToggleOne(2));

        assert_eq!(delete_one(&mut state, &service, 2).await, Some(Notice::Deleted));
        assert_eq!(state.document_ids(), vec![1, 3]);
        assert!(state.selection.is_empty());

        assert_eq!(delete_one(&mut state, &service, 9).await, Some(Notice::DeleteFailed));
        assert_eq!(state.document_ids(), vec![1, 3]);
    }
}
