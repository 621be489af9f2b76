//! Document Registry: metadata and stored files kept in step.
//!
//! Create writes the file before inserting the row, delete removes the file
//! (best effort) before removing the row. No lock spans both stores; each
//! metadata call is atomic on its own.

mod convert;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use arsip_core::bulk::{self, BulkDeleteReport, DocumentService};
use arsip_core::dates;
use arsip_core::document::{Category, Document, DocumentUpdate};
use arsip_core::form::check_file_with_limit;
use arsip_postgres::model::{NewDocument, UpdateDocument};
use async_trait::async_trait;
use jiff::civil::Date;

pub use self::error::{RegistryError, RegistryResult};
use self::convert::{category_to_row, document_from_row};
use crate::service::{FileStore, MetadataStore, StoredFile};

/// Tracing target for registry operations.
pub const TRACING_TARGET_REGISTRY: &str = "arsip_server::service::registry";

/// A file received with an upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Name of the file on the client.
    pub file_name: String,
    /// Declared content type.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Metadata and file of an upload, as received.
///
/// Fields stay optional so that every missing one is reported as a
/// validation failure instead of a decoding error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUpload {
    pub name: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub file: Option<UploadedFile>,
}

struct ValidUpload {
    name: String,
    category: Category,
    date: Date,
    file: UploadedFile,
}

impl NewUpload {
    fn validate(self) -> RegistryResult<ValidUpload> {
        let name = non_blank(self.name)
            .ok_or_else(|| RegistryError::validation("name", "Document name is required"))?;

        let category = non_blank(self.category)
            .ok_or_else(|| RegistryError::validation("category", "Category is required"))?;
        let category = Category::parse_label(&category).ok_or_else(|| {
            RegistryError::validation("category", format!("Unknown category '{category}'"))
        })?;

        let date = non_blank(self.date)
            .ok_or_else(|| RegistryError::validation("date", "Document date is required"))?;
        let date = parse_date(&date)?;

        let file = self
            .file
            .filter(|file| !file.file_name.trim().is_empty())
            .ok_or_else(|| RegistryError::validation("file", "A file is required"))?;

        Ok(ValidUpload {
            name,
            category,
            date,
            file,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_date(value: &str) -> RegistryResult<Date> {
    dates::parse_document_date(value)
        .map(|datetime| datetime.date())
        .ok_or_else(|| RegistryError::validation("date", format!("'{value}' is not a valid date")))
}

/// Coordinates the metadata store and the file store.
#[derive(Clone)]
pub struct DocumentRegistry {
    store: Arc<dyn MetadataStore>,
    files: FileStore,
}

impl DocumentRegistry {
    /// Creates a registry over the given stores.
    pub fn new(store: impl MetadataStore + 'static, files: FileStore) -> Self {
        Self::from_shared(Arc::new(store), files)
    }

    /// Creates a registry over an already shared metadata store.
    pub fn from_shared(store: Arc<dyn MetadataStore>, files: FileStore) -> Self {
        Self { store, files }
    }

    /// Returns the file store.
    #[inline]
    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// Lists every document in storage order, unfiltered.
    pub async fn list(&self) -> RegistryResult<Vec<Document>> {
        let rows = self.store.list().await?;
        Ok(rows.into_iter().map(document_from_row).collect())
    }

    /// Validates an upload, stores its file, then records its metadata.
    ///
    /// Nothing is written when validation fails. When the metadata insert
    /// fails, the just-written file is removed again.
    pub async fn create(&self, upload: NewUpload) -> RegistryResult<Document> {
        let upload = upload.validate()?;
        check_file_with_limit(
            &upload.file.content_type,
            upload.file.bytes.len() as u64,
            self.files.max_file_size(),
        )?;

        let stored = self
            .files
            .write(&upload.file.bytes, &upload.file.file_name)
            .await
            .map_err(RegistryError::StorageWrite)?;

        let new_document = NewDocument {
            name: upload.name,
            category: category_to_row(upload.category),
            document_date: upload.date.into(),
            file_path: stored.reference(),
        };

        match self.store.insert(new_document).await {
            Ok(row) => {
                tracing::info!(
                    target: TRACING_TARGET_REGISTRY,
                    id = row.id,
                    file_path = %row.file_path,
                    "Document created"
                );
                Ok(document_from_row(row))
            }
            Err(err) => {
                self.discard_orphan(&stored).await;
                Err(err.into())
            }
        }
    }

    async fn discard_orphan(&self, stored: &StoredFile) {
        if let Err(err) = tokio::fs::remove_file(&stored.path).await {
            tracing::warn!(
                target: TRACING_TARGET_REGISTRY,
                path = %stored.path.display(),
                error = %err,
                "Failed to remove file of a document that was not recorded"
            );
        }
    }

    /// Applies a metadata update. The stored file reference never changes.
    pub async fn update(&self, id: i64, update: DocumentUpdate) -> RegistryResult<Document> {
        if update.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(RegistryError::validation("name", "Document name is required"));
        }
        if update
            .date
            .as_ref()
            .is_some_and(|date| date.as_str().trim().is_empty())
        {
            return Err(RegistryError::validation("date", "Document date is required"));
        }

        let current = self
            .store
            .find(id)
            .await?
            .map(document_from_row)
            .ok_or(RegistryError::NotFound(id))?;

        let merged = update.merge_into(&current).map_err(|err| {
            RegistryError::validation("document", err.message.unwrap_or_default())
        })?;
        let date = parse_date(merged.date.as_str())?;

        let changes = UpdateDocument {
            name: Some(merged.name),
            category: Some(category_to_row(merged.category)),
            document_date: Some(date.into()),
        };

        let row = self
            .store
            .update(id, changes)
            .await?
            .ok_or(RegistryError::NotFound(id))?;

        tracing::info!(target: TRACING_TARGET_REGISTRY, id, "Document updated");
        Ok(document_from_row(row))
    }

    /// Deletes a document and, best effort, its stored file.
    ///
    /// A file that is already gone does not block the delete.
    pub async fn delete(&self, id: i64) -> RegistryResult<()> {
        let row = self
            .store
            .find(id)
            .await?
            .ok_or(RegistryError::NotFound(id))?;

        match self.files.remove(&row.file_path).await {
            Ok(Some(_)) => {}
            Ok(None) => tracing::info!(
                target: TRACING_TARGET_REGISTRY,
                id,
                file_path = %row.file_path,
                "Stored file already missing"
            ),
            Err(err) => tracing::warn!(
                target: TRACING_TARGET_REGISTRY,
                id,
                file_path = %row.file_path,
                error = %err,
                "Failed to remove stored file"
            ),
        }

        if !self.store.delete(id).await? {
            return Err(RegistryError::NotFound(id));
        }

        tracing::info!(target: TRACING_TARGET_REGISTRY, id, "Document deleted");
        Ok(())
    }

    /// Deletes each id independently, in ascending order.
    ///
    /// Duplicate ids are deleted once.
    pub async fn delete_many(&self, ids: &[i64]) -> BulkDeleteReport {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        bulk::delete_many(self, &ids).await
    }

    /// Reads a stored file by its reference or base name.
    pub async fn read_file(&self, reference: &str) -> RegistryResult<Option<(PathBuf, Vec<u8>)>> {
        self.files
            .read(reference)
            .await
            .map_err(RegistryError::StorageRead)
    }

    /// Counts the recorded documents.
    pub async fn count(&self) -> RegistryResult<i64> {
        Ok(self.store.count().await?)
    }
}

#[async_trait]
impl DocumentService for DocumentRegistry {
    async fn delete_document(&self, id: i64) -> arsip_core::Result<()> {
        self.delete(id).await.map_err(Into::into)
    }
}
