//! Document repository for the metadata store.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{Document, NewDocument, UpdateDocument};
use crate::{PgClient, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Row-level operations on the `documents` table.
///
/// Every method is a single statement, so each call is atomic on its own
/// and no transaction spans several calls.
pub trait DocumentRepository {
    /// Lists every document in storage order (ascending id).
    fn list_documents(&self) -> impl Future<Output = PgResult<Vec<Document>>> + Send;

    /// Finds a document by its id.
    fn find_document_by_id(
        &self,
        document_id: i64,
    ) -> impl Future<Output = PgResult<Option<Document>>> + Send;

    /// Inserts a new document row and returns it with its assigned id.
    fn create_document(
        &self,
        new_document: NewDocument,
    ) -> impl Future<Output = PgResult<Document>> + Send;

    /// Applies metadata changes to an existing row.
    ///
    /// Returns `None` if no row has this id.
    fn update_document(
        &self,
        document_id: i64,
        changes: UpdateDocument,
    ) -> impl Future<Output = PgResult<Option<Document>>> + Send;

    /// Deletes a row, returning whether one was removed.
    fn delete_document(&self, document_id: i64) -> impl Future<Output = PgResult<bool>> + Send;

    /// Counts the stored documents.
    fn count_documents(&self) -> impl Future<Output = PgResult<i64>> + Send;
}

impl DocumentRepository for PgClient {
    async fn list_documents(&self) -> PgResult<Vec<Document>> {
        let mut conn = self.get_connection().await?;

        use schema::documents::{self, dsl};

        let documents = documents::table
            .order(dsl::id.asc())
            .select(Document::as_select())
            .load(&mut conn)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(target: TRACING_TARGET_QUERY, count = documents.len(), "Listed documents");
        Ok(documents)
    }

    async fn find_document_by_id(&self, document_id: i64) -> PgResult<Option<Document>> {
        let mut conn = self.get_connection().await?;

        use schema::documents::{self, dsl};

        let document = documents::table
            .filter(dsl::id.eq(document_id))
            .select(Document::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(document)
    }

    async fn create_document(&self, new_document: NewDocument) -> PgResult<Document> {
        let mut conn = self.get_connection().await?;

        use schema::documents;

        let document = diesel::insert_into(documents::table)
            .values(&new_document)
            .returning(Document::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(target: TRACING_TARGET_QUERY, document_id = document.id, "Inserted document");
        Ok(document)
    }

    async fn update_document(
        &self,
        document_id: i64,
        changes: UpdateDocument,
    ) -> PgResult<Option<Document>> {
        // Diesel rejects an empty changeset, and there is nothing to write anyway.
        if changes.is_empty() {
            return self.find_document_by_id(document_id).await;
        }

        let mut conn = self.get_connection().await?;

        use schema::documents::{self, dsl};

        let document = diesel::update(documents::table.filter(dsl::id.eq(document_id)))
            .set(&changes)
            .returning(Document::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(document)
    }

    async fn delete_document(&self, document_id: i64) -> PgResult<bool> {
        let mut conn = self.get_connection().await?;

        use schema::documents::{self, dsl};

        let affected = diesel::delete(documents::table.filter(dsl::id.eq(document_id)))
            .execute(&mut conn)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(target: TRACING_TARGET_QUERY, document_id, affected, "Deleted document");
        Ok(affected > 0)
    }

    async fn count_documents(&self) -> PgResult<i64> {
        let mut conn = self.get_connection().await?;

        use schema::documents;

        let count = documents::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }
}
