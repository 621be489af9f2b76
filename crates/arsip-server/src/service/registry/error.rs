//! Failure taxonomy of the registry.

use std::borrow::Cow;
use std::io;

use arsip_core::ErrorKind as CoreErrorKind;
use arsip_core::form::FileRejection;
use arsip_postgres::PgError;

/// Result type of registry operations.
pub type RegistryResult<T, E = RegistryError> = Result<T, E>;

/// Why a registry operation failed.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A required field is missing or invalid. Raised before any I/O.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: Cow<'static, str>,
    },

    /// The uploaded file is larger than allowed.
    #[error("{0}")]
    FileTooLarge(FileRejection),

    /// No document has this id.
    #[error("document {0} does not exist")]
    NotFound(i64),

    /// The uploaded file could not be written.
    #[error("failed to store the uploaded file")]
    StorageWrite(#[source] io::Error),

    /// A stored file could not be read.
    #[error("failed to read the stored file")]
    StorageRead(#[source] io::Error),

    /// The metadata store rejected the operation.
    #[error("metadata store operation failed")]
    Persistence(#[source] PgError),

    /// The metadata store could not be reached.
    #[error("metadata store is unavailable")]
    StorageUnavailable(#[source] PgError),
}

impl RegistryError {
    /// Creates a validation error for `field`.
    pub fn validation(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns the shared error kind.
    pub fn kind(&self) -> CoreErrorKind {
        match self {
            Self::Validation { .. } | Self::FileTooLarge(_) => CoreErrorKind::Validation,
            Self::NotFound(_) => CoreErrorKind::NotFound,
            Self::StorageWrite(_) => CoreErrorKind::StorageWrite,
            Self::StorageRead(_) => CoreErrorKind::StorageRead,
            Self::Persistence(_) => CoreErrorKind::Persistence,
            Self::StorageUnavailable(_) => CoreErrorKind::StorageUnavailable,
        }
    }
}

impl From<PgError> for RegistryError {
    fn from(err: PgError) -> Self {
        if err.is_unavailable() {
            Self::StorageUnavailable(err)
        } else {
            Self::Persistence(err)
        }
    }
}

impl From<FileRejection> for RegistryError {
    fn from(rejection: FileRejection) -> Self {
        match rejection {
            FileRejection::TooLarge => Self::FileTooLarge(rejection),
            FileRejection::UnsupportedType => Self::validation("file", rejection.to_string()),
        }
    }
}

impl From<RegistryError> for arsip_core::Error {
    fn from(err: RegistryError) -> Self {
        let message = err.to_string();
        arsip_core::Error::new(err.kind())
            .with_message(message)
            .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use arsip_postgres::error::TimeoutType;

    use super::*;

    #[test]
    fn pg_errors_split_by_availability() {
        let err = RegistryError::from(PgError::Timeout(TimeoutType::Wait));
        assert_eq!(err.kind(), CoreErrorKind::StorageUnavailable);

        let err = RegistryError::from(PgError::Unexpected("constraint".into()));
        assert_eq!(err.kind(), CoreErrorKind::Persistence);
    }

    #[test]
    fn file_rejections_are_validation_failures() {
        let err = RegistryError::from(FileRejection::UnsupportedType);
        assert!(matches!(err, RegistryError::Validation { field: "file", .. }));

        let err = RegistryError::from(FileRejection::TooLarge);
        assert_eq!(err.kind(), CoreErrorKind::Validation);
    }

    #[test]
    fn converts_into_the_shared_error() {
        let err = arsip_core::Error::from(RegistryError::NotFound(9));
        assert_eq!(err.kind(), CoreErrorKind::NotFound);
        assert_eq!(err.to_string(), "not_found: document 9 does not exist");
    }
}
