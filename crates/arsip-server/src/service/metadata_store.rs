//! Metadata Store seam of the registry.

use arsip_postgres::model::{Document, NewDocument, UpdateDocument};
use arsip_postgres::query::DocumentRepository;
use arsip_postgres::{PgClient, PgResult};
use async_trait::async_trait;

/// Row operations the registry needs from its metadata store.
///
/// Implemented for [`PgClient`]; each call is a single atomic statement.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Lists every row in storage order.
    async fn list(&self) -> PgResult<Vec<Document>>;

    /// Finds a row by id.
    async fn find(&self, id: i64) -> PgResult<Option<Document>>;

    /// Inserts a row and returns it with its assigned id.
    async fn insert(&self, new_document: NewDocument) -> PgResult<Document>;

    /// Updates a row; `None` if it does not exist.
    async fn update(&self, id: i64, changes: UpdateDocument) -> PgResult<Option<Document>>;

    /// Deletes a row, returning whether one was removed.
    async fn delete(&self, id: i64) -> PgResult<bool>;

    /// Counts the rows.
    async fn count(&self) -> PgResult<i64>;
}

#[async_trait]
impl MetadataStore for PgClient {
    async fn list(&self) -> PgResult<Vec<Document>> {
        self.list_documents().await
    }

    async fn find(&self, id: i64) -> PgResult<Option<Document>> {
        self.find_document_by_id(id).await
    }

    async fn insert(&self, new_document: NewDocument) -> PgResult<Document> {
        self.create_document(new_document).await
    }

    async fn update(&self, id: i64, changes: UpdateDocument) -> PgResult<Option<Document>> {
        self.update_document(id, changes).await
    }

    async fn delete(&self, id: i64) -> PgResult<bool> {
        self.delete_document(id).await
    }

    async fn count(&self) -> PgResult<i64> {
        self.count_documents().await
    }
}
