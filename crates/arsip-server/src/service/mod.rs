//! Application state and dependency injection.

mod config;
mod file_store;
mod metadata_store;
mod registry;

use std::sync::Arc;

use arsip_postgres::PgClient;

pub use crate::service::config::{FileStoreConfig, ServiceConfig, ServiceConfigBuilder};
pub use crate::service::file_store::{
    FileStore, STORED_PATH_PREFIX, StoredFile, TRACING_TARGET_FILE_STORE, generate_stored_name,
    resolve_stored_reference,
};
pub use crate::service::metadata_store::MetadataStore;
#[cfg(test)]
pub(crate) use crate::service::metadata_store::memory::InMemoryStore;
pub use crate::service::registry::{
    DocumentRegistry, NewUpload, RegistryError, RegistryResult, TRACING_TARGET_REGISTRY,
    UploadedFile,
};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    pub registry: DocumentRegistry,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to Postgres, applies migrations and opens the file store.
    pub async fn new(service_config: ServiceConfig) -> Result<Self> {
        let postgres: PgClient = service_config.connect_postgres().await?;
        let files = service_config.open_file_store().await?;

        Ok(Self::from_parts(Arc::new(postgres), files))
    }

    /// Builds the state over already opened stores.
    pub fn from_parts(store: Arc<dyn MetadataStore>, files: FileStore) -> Self {
        Self {
            registry: DocumentRegistry::from_shared(store, files),
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(registry: DocumentRegistry);
