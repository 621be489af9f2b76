//! Health check handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::{MonitorStatus, ServiceStatus};
use crate::service::{DocumentRegistry, ServiceState};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "arsip_server::handler::monitors";

/// Reports whether the metadata store answers.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(registry): State<DocumentRegistry>,
) -> Result<(StatusCode, Json<MonitorStatus>)> {
    let (status_code, response) = match registry.count().await {
        Ok(count) => (
            StatusCode::OK,
            MonitorStatus::new(ServiceStatus::Healthy, Some(count)),
        ),
        Err(err) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %err,
                "Health check failed"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                MonitorStatus::new(ServiceStatus::Unhealthy, None),
            )
        }
    };

    tracing::debug!(
        target: TRACING_TARGET,
        status = %response.status,
        status_code = status_code.as_u16(),
        "Health status response prepared"
    );

    Ok((status_code, Json(response)))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Health status")
        .description("Returns 200 when the metadata store answers, 503 otherwise.")
        .response::<200, Json<MonitorStatus>>()
        .response::<503, Json<MonitorStatus>>()
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/api/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Health"))
}
