//! Repository traits implemented for [`PgClient`].
//!
//! [`PgClient`]: crate::PgClient

mod document;

pub use document::DocumentRepository;
