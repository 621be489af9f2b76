//! OpenAPI specification middleware with Scalar UI integration.
//!
//! ```rust
//! use aide::axum::ApiRouter;
//! use arsip_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//! use axum::Router;
//!
//! let app: Router<()> = ApiRouter::new().with_open_api(OpenApiConfig::default());
//! ```

use aide::axum::ApiRouter;
use aide::openapi::{Info, OpenApi};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// OpenAPI configuration for aide integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path which exposes the OpenAPI JSON specification.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    /// Path which exposes the Scalar API reference UI.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

/// Extension trait for [`ApiRouter`] to add OpenAPI documentation with Scalar UI.
pub trait RouterOpenApiExt<S> {
    /// Generates the OpenAPI document with the default API info and serves
    /// it together with the Scalar UI.
    fn with_open_api(self, config: OpenApiConfig) -> Router<S>;

    /// Same as [`with_open_api`], with caller-provided [`Info`].
    ///
    /// [`with_open_api`]: RouterOpenApiExt::with_open_api
    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: OpenApiConfig) -> Router<S> {
        let info = Info {
            title: "Arsip API".to_owned(),
            summary: Some("Document registry for an accounting office".to_owned()),
            description: Some(
                "Upload categorized financial documents (PDF, DOCX, XLSX, PPTX) with their \
                metadata, list them, edit the metadata and delete them one by one or in bulk."
                    .to_owned(),
            ),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info,
            ..OpenApi::default()
        };

        let scalar = Scalar::new(&config.open_api_json);
        let router = self
            .route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi));

        router.finish_api(&mut api).layer(Extension(api))
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use super::*;

    #[tokio::test]
    async fn serves_the_generated_document() -> anyhow::Result<()> {
        let router: Router<()> = ApiRouter::new().with_open_api(OpenApiConfig::default());
        let server = TestServer::new(router)?;

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["info"]["title"], "Arsip API");
        Ok(())
    }
}
