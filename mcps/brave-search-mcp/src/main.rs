//! Brave Search MCP Server
//!
//! # Configuration
//! Set `BRAVE_API_KEY`, optionally a TOML file (see `--config`).
//!
//! # Transports
//! stdio by default; `--use-sse` serves streamable HTTP at `/mcp`.

use clap::Parser;

use brave_search_mcp::cli::Cli;
use brave_search_mcp::transport::serve_http;
use brave_search_mcp::{BraveSearchMcpServer, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    mcp_common::init_tracing("brave_search_mcp", mcp_common::verbosity_level(cli.verbose))?;

    tracing::info!("Starting Brave Search MCP Server");

    let mut config = Config::load(cli.config.clone())?;
    cli.apply(&mut config);
    tracing::info!(
        base_url = %config.brave.base_url,
        id_policy = ?config.search.id_policy,
        "Configuration loaded"
    );

    let server = BraveSearchMcpServer::new(&config)?;

    if cli.use_sse {
        serve_http(server, &config.server.host, config.server.port).await
    } else {
        mcp_common::serve_stdio(server).await
    }
}
