//! Database models mapped to the metadata store tables.

mod document;

pub use document::{Document, NewDocument, UpdateDocument};
