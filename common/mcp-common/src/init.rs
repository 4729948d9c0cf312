//! Server initialization utilities
//!
//! Tracing setup and the stdio serving loop shared by MCP servers.

use rmcp::{transport::stdio, ServerHandler, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for MCP servers
///
/// Logs always go to stderr because stdout carries the MCP protocol when the
/// server runs over stdio. `RUST_LOG` directives take precedence over the
/// `default_level` applied to `crate_name`.
///
/// Set `LOG_FORMAT=json` for structured JSON output. Default is
/// human-readable text without ANSI colors.
///
/// ```rust,ignore
/// mcp_common::init_tracing("brave_search_mcp", "debug")?;
/// ```
pub fn init_tracing(crate_name: &str, default_level: &str) -> anyhow::Result<()> {
    let directive = format!("{}={}", crate_name, default_level);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Map a `-v` count to a tracing level name
pub fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Serve an MCP handler over stdio until the client disconnects
pub async fn serve_stdio<S>(server: S) -> anyhow::Result<()>
where
    S: ServerHandler,
{
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running on stdio, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
