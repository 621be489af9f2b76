#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for dashboard state transitions.
pub const TRACING_TARGET_DASHBOARD: &str = "arsip_core::dashboard";

/// Tracing target for bulk operations.
pub const TRACING_TARGET_BULK: &str = "arsip_core::bulk";

/// Tracing target for the legacy record boundary.
pub const TRACING_TARGET_WIRE: &str = "arsip_core::wire";

mod error;

pub mod bulk;
pub mod dashboard;
pub mod dates;
pub mod document;
pub mod form;
pub mod query;
mod selection;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use selection::{CheckboxState, Selection, SelectionState};

pub mod prelude {
    //! Commonly used types.

    pub use crate::bulk::{BulkDeleteReport, DocumentService};
    pub use crate::dashboard::{Action, DashboardState, Notice, NoticeLevel};
    pub use crate::document::{Category, Document, DocumentDate, DocumentUpdate};
    pub use crate::form::{EditForm, UploadForm};
    pub use crate::query::{DocumentQuery, Page, SortOrder};
    pub use crate::{Error, ErrorKind, Result, Selection, SelectionState};
}
