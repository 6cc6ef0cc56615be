//! HTTP plumbing for the tutorials collection: the REST client used by the
//! view-models, and an axum development backend that speaks the same protocol.

use anyhow::Context;
use axum::{routing::get, Router};

use tutorials_kernel::settings::ServerSettings;

pub mod backend;
pub mod client;
pub mod error;
pub mod router;

pub use backend::TutorialStore;
pub use client::{Ack, ClientError, TutorialApi, TutorialClient};

use router::RouterBuilder;

/// Name of the single resource collection; routes live under `/api/tutorials`.
pub const RESOURCE: &str = "tutorials";

/// Serve the development backend until the listener fails.
pub async fn start_server(settings: &ServerSettings, store: TutorialStore) -> anyhow::Result<()> {
    let address = format!("{}:{}", settings.host, settings.port);
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(settings, store);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {address}"))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the backend router with the tutorials resource and all middleware.
pub fn build_router(settings: &ServerSettings, store: TutorialStore) -> Router {
    RouterBuilder::new()
        .route("/healthz", get(health_check))
        .mount_resource(RESOURCE, backend::routes(store))
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.request_timeout_ms)
        .build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
