//! Router middleware, applied through extension traits on `axum::Router`.

mod observability;
mod recovery;
mod security;
mod specification;

pub use observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{
    CorsConfig, DEFAULT_MAX_BODY_SIZE, FrameOptions, MULTIPART_OVERHEAD, ReferrerPolicy,
    RouterSecurityExt, SecurityConfig,
};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
