#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use arsip_server::handler::{fallback, routes};
use arsip_server::middleware::{
    RouterObservabilityExt, RouterOpenApiExt, RouterRecoveryExt, RouterSecurityExt,
    SecurityConfig,
};
use arsip_server::service::{ServiceConfig, ServiceState};
use axum::Router;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "arsip_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "arsip_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "arsip_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let state = create_service_state(&cli).await?;
    let router = create_router(state, &cli);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Connects the metadata store and opens the upload directories.
async fn create_service_state(cli: &Cli) -> anyhow::Result<ServiceState> {
    let config = ServiceConfig::builder()
        .with_postgres(cli.postgres.clone())
        .with_file_store(cli.file_store.clone())
        .build()
        .context("invalid service configuration")?;

    let state = ServiceState::new(config)
        .await
        .context("failed to create service state")?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        "Document registry ready"
    );

    Ok(state)
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. Security - CORS, body limits, security headers, compression
/// 4. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, cli: &Cli) -> Router {
    let middleware = &cli.middleware;
    let security =
        SecurityConfig::default().with_max_upload_size(cli.file_store.max_upload_size);

    routes()
        .with_state::<()>(state)
        .with_open_api(middleware.openapi.clone())
        .fallback(fallback)
        .with_security(&middleware.cors, &security)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
