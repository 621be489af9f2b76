//! All `aide::axum::`[`ApiRouter`]s with related `axum::`[`Handler`]s.
//!
//! ```rust,no_run
//! use arsip_server::handler::{fallback, routes};
//! use arsip_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//! use arsip_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example(config: ServiceConfig) -> anyhow::Result<()> {
//! let state = ServiceState::new(config).await?;
//! let router = routes()
//!     .with_state::<()>(state)
//!     .with_open_api(OpenApiConfig::default())
//!     .fallback(fallback);
//! # Ok(())
//! # }
//! ```
//!
//! [`ApiRouter`]: aide::axum::ApiRouter
//! [`Handler`]: axum::handler::Handler

mod documents;
mod error;
mod monitors;
pub mod request;
pub mod response;
mod uploads;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

/// Answers every unmatched route with `404 Not Found`.
#[inline]
pub async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all routes.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(documents::routes())
        .merge(uploads::routes())
        .merge(monitors::routes())
}

#[cfg(test)]
pub(crate) mod test {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum_test::TestServer;
    use tempfile::TempDir;

    use super::{fallback, routes};
    use crate::middleware::{OpenApiConfig, RouterOpenApiExt};
    use crate::service::{FileStore, InMemoryStore, ServiceState};

    /// Full router over an in-memory metadata store and a temporary file store.
    pub struct TestApp {
        pub server: TestServer,
        pub store: Arc<InMemoryStore>,
        temp: TempDir,
    }

    impl TestApp {
        pub fn new() -> anyhow::Result<Self> {
            let temp = TempDir::new()?;
            let store = Arc::new(InMemoryStore::new());
            let files = FileStore::new(temp.path().join("uploads"))
                .with_fallback_dir(temp.path().join("legacy"));

            let state = ServiceState::from_parts(store.clone(), files);
            let router = routes()
                .with_state::<()>(state)
                .with_open_api(OpenApiConfig::default())
                .fallback(fallback);

            Ok(Self {
                server: TestServer::new(router)?,
                store,
                temp,
            })
        }

        fn primary_dir(&self) -> PathBuf {
            self.temp.path().join("uploads")
        }

        /// Counts the files in the primary upload directory.
        pub fn stored_file_count(&self) -> usize {
            std::fs::read_dir(self.primary_dir())
                .map(|dir| dir.count())
                .unwrap_or(0)
        }

        /// Deletes every file in the primary upload directory behind the registry's back.
        pub fn remove_stored_files(&self) -> anyhow::Result<()> {
            for entry in std::fs::read_dir(self.primary_dir())? {
                std::fs::remove_file(entry?.path())?;
            }
            Ok(())
        }

        pub fn write_stored_file(&self, name: &str, bytes: &[u8]) -> anyhow::Result<()> {
            std::fs::create_dir_all(self.primary_dir())?;
            std::fs::write(self.primary_dir().join(name), bytes)?;
            Ok(())
        }

        pub fn write_fallback_file(&self, name: &str, bytes: &[u8]) -> anyhow::Result<()> {
            let dir = self.temp.path().join("legacy");
            std::fs::create_dir_all(&dir)?;
            std::fs::write(dir.join(name), bytes)?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let app = TestApp::new()?;
        assert!(app.server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() -> anyhow::Result<()> {
        let app = TestApp::new()?;

        let response = app.server.get("/api/nothing").await;
        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "not_found");
        Ok(())
    }

    #[tokio::test]
    async fn openapi_document_lists_document_routes() -> anyhow::Result<()> {
        let app = TestApp::new()?;

        let body: serde_json::Value = app.server.get("/api/openapi.json").await.json();
        assert!(body["paths"]["/api/documents"]["get"].is_object());
        assert!(body["paths"]["/api/documents/{id}"]["delete"].is_object());
        assert!(body["paths"]["/api/documents/bulk-delete"]["post"].is_object());
        Ok(())
    }
}
