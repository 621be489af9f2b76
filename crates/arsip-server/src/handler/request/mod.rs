//! Request types for HTTP handlers.

mod documents;
mod paths;

pub use documents::*;
pub use paths::*;
