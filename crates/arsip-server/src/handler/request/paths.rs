//! Path parameter types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Path parameters for single-document operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DocumentPathParams {
    /// Identifier of the document.
    pub id: i64,
}

/// Path parameters for stored file access.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadPathParams {
    /// Base name of the stored file.
    pub file_name: String,
}
