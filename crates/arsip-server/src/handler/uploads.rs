//! Read-only access to stored files under `/uploads/<file name>`.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};

use crate::extract::{Json, Path};
use crate::handler::request::UploadPathParams;
use crate::handler::response::ErrorResponse;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{DocumentRegistry, STORED_PATH_PREFIX, ServiceState, resolve_stored_reference};

/// Tracing target for stored file access.
const TRACING_TARGET: &str = "arsip_server::handler::uploads";

fn file_not_found(file_name: &str) -> Error<'static> {
    ErrorKind::NotFound
        .with_message("File not found")
        .with_resource("file")
        .with_context(format!("no stored file named '{file_name}'"))
}

/// Serves a stored file inline with a content type derived from its extension.
#[tracing::instrument(skip_all, fields(file_name = %path_params.file_name))]
async fn get_upload(
    State(registry): State<DocumentRegistry>,
    Path(path_params): Path<UploadPathParams>,
) -> Result<(StatusCode, HeaderMap, Vec<u8>)> {
    let file_name = path_params.file_name.as_str();

    // Only bare file names are served; anything that needs reducing is refused.
    if resolve_stored_reference(file_name) != Some(file_name) {
        tracing::warn!(target: TRACING_TARGET, "Rejected unsafe file name");
        return Err(file_not_found(file_name));
    }

    let Some((path, bytes)) = registry.read_file(file_name).await? else {
        return Err(file_not_found(file_name));
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    let mut headers = HeaderMap::new();
    if let Ok(content_type) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(CONTENT_TYPE, content_type);
    }
    if let Ok(disposition) = HeaderValue::from_str(&format!("inline; filename=\"{file_name}\"")) {
        headers.insert(CONTENT_DISPOSITION, disposition);
    }
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("private, max-age=300"));

    tracing::debug!(
        target: TRACING_TARGET,
        path = %path.display(),
        content_type = %mime,
        size = bytes.len(),
        "Serving stored file"
    );

    Ok((StatusCode::OK, headers, bytes))
}

fn get_upload_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get stored file")
        .description(
            "Returns the bytes of a stored file by its base name, as found in the \
            `file_path` of a document. Upload directories are checked in priority order.",
        )
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] serving stored files.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            &format!("/{STORED_PATH_PREFIX}/{{file_name}}"),
            get_with(get_upload, get_upload_docs),
        )
        .with_path_items(|item| item.tag("Uploads"))
}

#[cfg(test)]
mod tests {
    use axum::http::header::CONTENT_TYPE;
    use axum::http::StatusCode;

    use crate::handler::test::TestApp;

    #[tokio::test]
    async fn serves_files_with_their_content_type() -> anyhow::Result<()> {
        let app = TestApp::new()?;
        app.write_stored_file("file-1-000000001.pdf", b"%PDF-1.7")?;

        let response = app.server.get("/uploads/file-1-000000001.pdf").await;
        response.assert_status_ok();
        assert_eq!(response.header(CONTENT_TYPE), "application/pdf");
        assert_eq!(response.as_bytes().as_ref(), b"%PDF-1.7");
        Ok(())
    }

    #[tokio::test]
    async fn falls_back_to_later_upload_dirs() -> anyhow::Result<()> {
        let app = TestApp::new()?;
        app.write_fallback_file("file-2-000000002.docx", b"PK")?;

        let response = app.server.get("/uploads/file-2-000000002.docx").await;
        response.assert_status_ok();
        assert_eq!(
            response.header(CONTENT_TYPE),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_and_unsafe_names_are_not_found() -> anyhow::Result<()> {
        let app = TestApp::new()?;
        app.write_stored_file("secret.pdf", b"%PDF")?;

        app.server
            .get("/uploads/nothing-here.pdf")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.server
            .get("/uploads/..%2Fsecret.pdf")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.server
            .get("/uploads/..")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        Ok(())
    }
}
