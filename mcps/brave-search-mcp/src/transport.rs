//! Streamable HTTP transport
//!
//! The MCP service is mounted at `/mcp`; `/health` answers `ok` for
//! container health checks.

use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tokio::net::TcpListener;

use crate::server::BraveSearchMcpServer;

/// Build the HTTP router for `server`
pub fn router(server: BraveSearchMcpServer) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    );

    Router::new()
        .route("/health", get(health))
        .nest_service("/mcp", service)
}

async fn health() -> &'static str {
    "ok"
}

/// Serve over HTTP until Ctrl-C
pub async fn serve_http(server: BraveSearchMcpServer, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "Server running on streamable HTTP at /mcp");
    axum::serve(listener, router(server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
    }
}
