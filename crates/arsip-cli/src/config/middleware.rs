//! Middleware configuration for the HTTP server.
//!
//! All middleware configs are re-exported from `arsip-server` and support
//! both CLI arguments and environment variables.
//!
//! ```bash
//! arsip --allowed-origins "https://arsip.example.com" --request-timeout 60
//! ```

use anyhow::anyhow;
use arsip_server::middleware::{CorsConfig, OpenApiConfig, RecoveryConfig};
use clap::Args;
use serde::{Deserialize, Serialize};

use super::TRACING_TARGET_CONFIG;

/// Middleware configuration combining CORS, OpenAPI, and recovery settings.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// CORS (Cross-Origin Resource Sharing) configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Paths of the OpenAPI document and the Scalar UI.
    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    /// Request timeout and panic recovery.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Validates the middleware settings.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.recovery.validate().map_err(|err| anyhow!(err))?;
        if !self.openapi.open_api_json.starts_with('/') || !self.openapi.scalar_ui.starts_with('/')
        {
            return Err(anyhow!("OpenAPI paths must start with '/'"));
        }
        Ok(())
    }

    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            credentials = self.cors.allow_credentials,
            "CORS configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            openapi_path = %self.openapi.open_api_json,
            scalar_path = %self.openapi.scalar_ui,
            "OpenAPI configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "Recovery configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MiddlewareConfig {
        MiddlewareConfig {
            cors: CorsConfig::default(),
            openapi: OpenApiConfig::default(),
            recovery: RecoveryConfig::default(),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn rejects_zero_timeout_and_relative_paths() {
        let mut middleware = config();
        middleware.recovery = RecoveryConfig::with_timeout_secs(0);
        assert!(middleware.validate().is_err());

        let mut middleware = config();
        middleware.openapi.scalar_ui = "scalar".to_owned();
        assert!(middleware.validate().is_err());
    }
}
