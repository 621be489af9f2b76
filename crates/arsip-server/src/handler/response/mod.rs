//! Response types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod documents;
mod errors;
mod monitors;

pub use documents::*;
pub use errors::*;
pub use monitors::*;

/// Response carrying only a human-readable message.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Message {
    /// What happened.
    pub message: String,
}

impl Message {
    /// Creates a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response carrying a message and the affected resource.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "{T}Envelope")]
pub struct Envelope<T> {
    /// What happened.
    pub message: String,
    /// The affected resource.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wraps `data` with a message.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
