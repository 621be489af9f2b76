//! Registry error to HTTP error conversion.

use crate::handler::{Error, ErrorKind};
use crate::service::RegistryError;

/// Tracing target for registry failures seen by handlers.
const TRACING_TARGET: &str = "arsip_server::registry_errors";

impl From<RegistryError> for Error<'static> {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::Validation { field, message } => ErrorKind::BadRequest
                .with_message(message)
                .with_resource(field),
            RegistryError::FileTooLarge(rejection) => ErrorKind::PayloadTooLarge
                .with_message(rejection.to_string())
                .with_resource("file"),
            RegistryError::NotFound(id) => ErrorKind::NotFound
                .with_message(format!("Document {id} does not exist"))
                .with_resource("document"),
            RegistryError::Persistence(pg_error) | RegistryError::StorageUnavailable(pg_error) => {
                pg_error.into()
            }
            RegistryError::StorageWrite(io_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %io_error,
                    "failed to write uploaded file"
                );
                ErrorKind::InternalServerError.with_context(io_error.to_string())
            }
            RegistryError::StorageRead(io_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %io_error,
                    "failed to read stored file"
                );
                ErrorKind::InternalServerError.with_context(io_error.to_string())
            }
        }
    }
}
