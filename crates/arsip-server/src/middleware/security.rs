//! Security middleware for HTTP request protection.
//!
//! CORS, security headers, request body size limiting and response
//! compression.

use std::time::Duration;

use arsip_core::form::MAX_FILE_SIZE;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{self, HeaderValue};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

/// Room left for multipart framing and the metadata fields around an upload.
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Default request body limit: one maximum-size file plus multipart overhead.
pub const DEFAULT_MAX_BODY_SIZE: usize = MAX_FILE_SIZE as usize + MULTIPART_OVERHEAD;

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers security middlewares with the provided configurations.
    fn with_security(self, cors: &CorsConfig, security: &SecurityConfig) -> Self;

    /// Layers security middlewares with default configurations.
    ///
    /// Uses development-friendly CORS settings.
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig, security: &SecurityConfig) -> Self {
        let cors_layer = CorsLayer::new()
            .allow_origin(cors.to_header_values())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(cors.allow_credentials)
            .max_age(cors.max_age());

        let mut router = self
            .layer(DefaultBodyLimit::max(security.max_body_size))
            .layer(RequestBodyLimitLayer::new(security.max_body_size))
            .layer(CompressionLayer::new())
            .layer(cors_layer)
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static(security.frame_options.as_str()),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static(security.referrer_policy.as_str()),
            ));

        if let Some(csp) = security
            .content_security_policy
            .as_deref()
            .and_then(|csp| HeaderValue::from_str(csp).ok())
        {
            router = router.layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_SECURITY_POLICY,
                csp,
            ));
        }

        router
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default(), &SecurityConfig::default())
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// List of allowed CORS origins.
    ///
    /// If empty, defaults to localhost origins for development.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight requests in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    /// Whether to allow credentials in CORS requests.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ALLOW_CREDENTIALS", default_value = "true")
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Converts configured origins to header values, falling back to localhost for development.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
                HeaderValue::from_static("http://localhost:5173"),
                HeaderValue::from_static("http://127.0.0.1:5173"),
            ]
        } else {
            self.allowed_origins
                .iter()
                .filter_map(|origin| origin.trim().parse().ok())
                .collect()
        }
    }
}

/// Security headers and body limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SecurityConfig {
    /// Largest accepted request body, in bytes.
    pub max_body_size: usize,

    /// Content Security Policy directives controlling resource loading.
    pub content_security_policy: Option<String>,

    /// X-Frame-Options value.
    ///
    /// Stored files are previewed in frames by the dashboard, so the
    /// default allows same-origin framing.
    pub frame_options: FrameOptions,

    /// Referrer-Policy controlling referrer information in requests.
    pub referrer_policy: ReferrerPolicy,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            content_security_policy: Some(
                "default-src 'self'; img-src 'self' data:; base-uri 'self'; form-action 'self'"
                    .to_owned(),
            ),
            frame_options: FrameOptions::SameOrigin,
            referrer_policy: ReferrerPolicy::StrictOriginWhenCrossOrigin,
        }
    }
}

impl SecurityConfig {
    /// Sizes the body limit for uploads of at most `max_upload_size` bytes.
    pub fn with_max_upload_size(mut self, max_upload_size: u64) -> Self {
        let max_upload_size = usize::try_from(max_upload_size).unwrap_or(usize::MAX);
        self.max_body_size = max_upload_size.saturating_add(MULTIPART_OVERHEAD);
        self
    }
}

/// X-Frame-Options header values controlling frame embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOptions {
    /// The page cannot be displayed in a frame, regardless of the site.
    Deny,
    /// The page can only be displayed in a frame on the same origin.
    SameOrigin,
}

impl FrameOptions {
    /// Returns the header value string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::SameOrigin => "SAMEORIGIN",
        }
    }
}

/// Referrer-Policy header values controlling referrer information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferrerPolicy {
    /// No referrer information is sent.
    NoReferrer,
    /// Sends full URL for same-origin, only origin for cross-origin.
    StrictOriginWhenCrossOrigin,
}

impl ReferrerPolicy {
    /// Returns the header value string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoReferrer => "no-referrer",
            Self::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[test]
    fn empty_origins_fall_back_to_localhost() {
        let values = CorsConfig::default().to_header_values();
        assert!(values.contains(&HeaderValue::from_static("http://localhost:5173")));

        let config = CorsConfig {
            allowed_origins: vec!["https://arsip.example".into(), "bad\u{7f}origin".into()],
            ..CorsConfig::default()
        };
        assert_eq!(
            config.to_header_values(),
            vec![HeaderValue::from_static("https://arsip.example")]
        );
    }

    #[test]
    fn body_limit_leaves_room_for_multipart_framing() {
        let config = SecurityConfig::default().with_max_upload_size(1024);
        assert_eq!(config.max_body_size, 1024 + MULTIPART_OVERHEAD);
        assert!(SecurityConfig::default().max_body_size > MAX_FILE_SIZE as usize);
    }

    #[tokio::test]
    async fn security_headers_are_set() -> anyhow::Result<()> {
        let router = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_default_security();
        let server = TestServer::new(router)?;

        let response = server.get("/").await;
        response.assert_header("x-content-type-options", "nosniff");
        response.assert_header("x-frame-options", "SAMEORIGIN");
        Ok(())
    }
}
