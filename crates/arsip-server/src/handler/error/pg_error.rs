//! Metadata store error to HTTP error conversion.

use arsip_postgres::PgError;
use arsip_postgres::types::DocumentConstraints;

use crate::handler::{Error, ErrorKind};

/// Tracing target for metadata store failures seen by handlers.
const TRACING_TARGET: &str = "arsip_server::postgres_errors";

impl From<DocumentConstraints> for Error<'static> {
    fn from(constraint: DocumentConstraints) -> Self {
        let error = match constraint {
            DocumentConstraints::NameNotEmpty | DocumentConstraints::NameLengthMax => {
                ErrorKind::BadRequest.with_message(constraint.message())
            }
            DocumentConstraints::FilePathNotEmpty => ErrorKind::InternalServerError
                .with_context(constraint.message()),
        };

        error.with_resource("document")
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        if let Some(constraint) = error.constraint_violation() {
            tracing::warn!(
                target: TRACING_TARGET,
                constraint = %constraint,
                "documents constraint violated"
            );
            return constraint.into();
        }

        match error {
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout"
                );
                ErrorKind::InternalServerError.with_context("metadata store is unavailable")
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::InternalServerError.with_context("metadata store is unavailable")
            }
            PgError::Config(config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Migration(migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Query(query_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "database query error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Unexpected(message) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %message,
                    "unexpected database error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use arsip_postgres::error::TimeoutType;

    use super::*;

    #[test]
    fn unreachable_store_is_a_server_error() {
        let error = Error::from(PgError::Timeout(TimeoutType::Wait));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), None);
        assert_eq!(error.context(), Some("metadata store is unavailable"));
    }

    #[test]
    fn name_constraints_are_client_errors() {
        let error = Error::from(DocumentConstraints::NameLengthMax);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("document"));

        let error = Error::from(DocumentConstraints::FilePathNotEmpty);
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn other_failures_hide_their_detail() {
        let error = Error::from(PgError::Unexpected("relation missing".into()));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), None);
    }
}
