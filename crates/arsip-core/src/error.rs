//! Error taxonomy shared by the registry client and server.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Boxed error that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of failures in the document registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is missing or invalid. User-correctable.
    Validation,
    /// The referenced document does not exist.
    NotFound,
    /// Reading from the file store failed.
    StorageRead,
    /// Writing to the file store failed.
    StorageWrite,
    /// The metadata store rejected or failed an operation.
    Persistence,
    /// The metadata store could not be reached.
    StorageUnavailable,
    /// A bulk action was attempted with nothing selected.
    NoSelection,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// Returns whether retrying the same request may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::StorageRead | Self::StorageWrite | Self::Persistence | Self::StorageUnavailable
        )
    }
}

/// A structured error with a kind, an optional message and an optional source.
#[derive(Debug, Error)]
#[error("{}{}", kind.as_ref(), message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation).with_message(message)
    }

    /// Creates a new not found error for a document id.
    pub fn not_found(id: i64) -> Self {
        Self::new(ErrorKind::NotFound).with_message(format!("document {id} does not exist"))
    }

    /// Creates a new no-selection error.
    pub fn no_selection() -> Self {
        Self::new(ErrorKind::NoSelection).with_message("no documents are selected")
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    #[inline]
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("malformed document payload").with_source(error)
    }
}
