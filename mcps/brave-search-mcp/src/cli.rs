//! Command line interface

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "brave-search-mcp")]
#[command(about = "MCP server for the Brave Search API", version)]
pub struct Cli {
    /// Serve over streamable HTTP (SSE responses) instead of stdio
    #[arg(long = "use-sse", alias = "useSSE")]
    pub use_sse: bool,

    /// HTTP port (with --use-sse)
    #[arg(long)]
    pub port: Option<u16>,

    /// HTTP bind address (with --use-sse)
    #[arg(long)]
    pub host: Option<String>,

    /// Path to a TOML config file
    #[arg(long, env = "BRAVE_SEARCH_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply flag overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
    }
}
