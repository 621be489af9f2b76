//! Document registry handlers.
//!
//! Listing, upload, metadata edits and deletion of documents. Uploads are
//! multipart forms, every other body is JSON. Both the current and the
//! older field names (`nama_sppd`, `kategori`, `tanggal_sppd`) are accepted
//! on input; responses always use the current names.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::extract::multipart::Field;
use axum::http::StatusCode;

use crate::extract::{Json, Multipart, Path, ValidateJson};
use crate::handler::request::{BulkDeleteDocuments, DocumentPathParams, UpdateDocument};
use crate::handler::response::{BulkDelete, Document, Documents, Envelope, ErrorResponse, Message};
use crate::handler::Result;
use crate::service::{DocumentRegistry, NewUpload, ServiceState, UploadedFile};

/// Tracing target for document operations.
const TRACING_TARGET: &str = "arsip_server::handler::documents";

/// Content type assumed for file parts that do not declare one.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Lists every document in storage order.
#[tracing::instrument(skip_all)]
async fn list_documents(
    State(registry): State<DocumentRegistry>,
) -> Result<(StatusCode, Json<Documents>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing documents");

    let documents: Documents = registry
        .list()
        .await?
        .into_iter()
        .map(Document::from)
        .collect();

    tracing::debug!(
        target: TRACING_TARGET,
        document_count = documents.len(),
        "Documents listed"
    );

    Ok((StatusCode::OK, Json(documents)))
}

fn list_documents_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List documents")
        .description(
            "Returns all documents, unfiltered and unpaginated, in storage order. \
            Filtering, sorting and paging happen on the client.",
        )
        .response::<200, Json<Documents>>()
        .response::<500, Json<ErrorResponse>>()
}

async fn field_text(field: Field<'_>) -> Result<String> {
    Ok(field.text().await?)
}

/// Collects the known form fields of an upload. Unknown fields are skipped.
async fn read_upload(mut multipart: Multipart) -> Result<NewUpload> {
    let mut upload = NewUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(field_name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match field_name.as_str() {
            "name" | "nama_sppd" => upload.name = Some(field_text(field).await?),
            "category" | "kategori" => upload.category = Some(field_text(field).await?),
            "date" | "tanggal_sppd" => upload.date = Some(field_text(field).await?),
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_CONTENT_TYPE)
                    .to_owned();
                let bytes = field.bytes().await?.to_vec();

                tracing::debug!(
                    target: TRACING_TARGET,
                    file_name = %file_name,
                    content_type = %content_type,
                    size = bytes.len(),
                    "Received file part"
                );

                upload.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            other => {
                tracing::debug!(target: TRACING_TARGET, field = %other, "Skipping unknown form field");
            }
        }
    }

    Ok(upload)
}

/// Uploads a document: metadata fields plus one file.
///
/// Form fields:
/// - `name` (or `nama_sppd`)
/// - `category` (or `kategori`)
/// - `date` (or `tanggal_sppd`)
/// - `file`: PDF, DOCX, XLSX or PPTX, at most 10 MiB
#[tracing::instrument(skip_all)]
async fn upload_document(
    State(registry): State<DocumentRegistry>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Envelope<Document>>)> {
    tracing::debug!(target: TRACING_TARGET, "Uploading document");

    let upload = read_upload(multipart).await?;
    let document = registry.create(upload).await?;

    tracing::info!(
        target: TRACING_TARGET,
        document_id = document.id,
        "Document uploaded"
    );

    let response = Envelope::new("Dokumen berhasil diunggah", Document::from(document));
    Ok((StatusCode::CREATED, Json(response)))
}

fn upload_document_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Upload document")
        .description(
            "Stores the uploaded file and records its metadata. Nothing is stored when a \
            field is missing or invalid.",
        )
        .response::<201, Json<Envelope<Document>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<413, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Updates the metadata of a document. The stored file never changes.
#[tracing::instrument(skip_all, fields(document_id = path_params.id))]
async fn update_document(
    State(registry): State<DocumentRegistry>,
    Path(path_params): Path<DocumentPathParams>,
    ValidateJson(request): ValidateJson<UpdateDocument>,
) -> Result<(StatusCode, Json<Envelope<Document>>)> {
    tracing::debug!(target: TRACING_TARGET, "Updating document");

    let update = request.into_update()?;
    let document = registry.update(path_params.id, update).await?;

    tracing::info!(target: TRACING_TARGET, "Document updated");

    let response = Envelope::new("Dokumen berhasil diperbarui", Document::from(document));
    Ok((StatusCode::OK, Json(response)))
}

fn update_document_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update document")
        .description("Changes the name, category or date of a document.")
        .response::<200, Json<Envelope<Document>>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Deletes a document and its stored file.
#[tracing::instrument(skip_all, fields(document_id = path_params.id))]
async fn delete_document(
    State(registry): State<DocumentRegistry>,
    Path(path_params): Path<DocumentPathParams>,
) -> Result<(StatusCode, Json<Message>)> {
    tracing::debug!(target: TRACING_TARGET, "Deleting document");

    registry.delete(path_params.id).await?;

    tracing::info!(target: TRACING_TARGET, "Document deleted");

    Ok((StatusCode::OK, Json(Message::new("Dokumen berhasil dihapus"))))
}

fn delete_document_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete document")
        .description(
            "Removes the stored file, if still present, and the document record. \
            A file that is already gone does not block the delete.",
        )
        .response::<200, Json<Message>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
}

/// Deletes several documents, one at a time, reporting each outcome.
#[tracing::instrument(skip_all, fields(requested = request.ids.len()))]
async fn bulk_delete_documents(
    State(registry): State<DocumentRegistry>,
    ValidateJson(request): ValidateJson<BulkDeleteDocuments>,
) -> Result<(StatusCode, Json<BulkDelete>)> {
    tracing::debug!(target: TRACING_TARGET, "Bulk deleting documents");

    let report = registry.delete_many(&request.ids).await;
    if !report.is_complete() {
        tracing::warn!(
            target: TRACING_TARGET,
            failed_ids = ?report.failed_ids(),
            "Some documents were not deleted"
        );
    }

    Ok((StatusCode::OK, Json(BulkDelete::from(report))))
}

fn bulk_delete_documents_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete documents")
        .description(
            "Deletes each id independently, in ascending order, and never stops at the \
            first failure. Always answers 200 with one outcome per distinct id.",
        )
        .response::<200, Json<BulkDelete>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all document routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/api/documents",
            get_with(list_documents, list_documents_docs)
                .post_with(upload_document, upload_document_docs),
        )
        .api_route(
            "/api/documents/bulk-delete",
            post_with(bulk_delete_documents, bulk_delete_documents_docs),
        )
        .api_route(
            "/api/documents/{id}",
            put_with(update_document, update_document_docs)
                .delete_with(delete_document, delete_document_docs),
        )
        .with_path_items(|item| item.tag("Documents"))
}
