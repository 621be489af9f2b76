//! Enumerations and constraint names used by the `documents` table.

mod constraints;
mod document_category;

pub use constraints::DocumentConstraints;
pub use document_category::DocumentCategory;
