//! Brave Search MCP Library
//!
//! Web, news, video, image and local (POI) search through the Brave Search
//! API, exposed as MCP tools.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use brave_search_mcp::{BraveSearchMcpServer, Config, EmbeddableMcp};
//!
//! let config = Config::load(None)?;
//! let server = BraveSearchMcpServer::new(&config)?;
//! let result = server
//!     .call_tool("brave_local_search", serde_json::json!({"query": "pizza near Central Park"}))
//!     .await?;
//! ```
//!
//! # Usage as Binary
//!
//! Run directly: `BRAVE_API_KEY=... brave-search-mcp`
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "brave-search": { "command": "./brave-search-mcp", "env": { "BRAVE_API_KEY": "..." } } } }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod format;
pub mod handlers;
pub mod images;
pub mod local;
pub mod notify;
pub mod params;
pub mod server;
pub mod transport;

// Re-export main server type
pub use server::BraveSearchMcpServer;

pub use api::{BraveApi, BraveClient, BraveError, BraveResult};
pub use config::Config;
pub use local::{IdPolicy, LocalSearchSettings};

// Re-export parameter types for direct API usage
pub use params::{
    ImageSearchParams, LocalSearchParams, NewsSearchParams, VideoSearchParams, WebSearchParams,
};

// Re-export EmbeddableMcp trait for in-process usage
pub use mcp_common::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
