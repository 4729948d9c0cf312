//! In-process tool dispatch
//!
//! [`EmbeddableMcp`] lets a host call a server's tools by name without any
//! transport in between. Implementations map each tool name to its typed
//! parameter struct and handler, so an unknown name or a parameter object
//! that does not decode is rejected before any handler runs.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//!
//! let result = server
//!     .call_tool("brave_web_search", serde_json::json!({ "query": "rust" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for in-process tool calls
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Parameters did not decode into the tool's parameter type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The handler rejected the request at the protocol level
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

/// Result type for in-process tool calls
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// Trait for MCP servers whose tools can be invoked in-process
///
/// Implementations must be `Send + Sync`; hosts may issue concurrent calls.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Returns the server name for identification
    fn server_name(&self) -> &str;

    /// Returns every registered tool with its name, description and schema
    fn list_tools(&self) -> Vec<Tool>;

    /// Executes a tool by name with a JSON parameter object
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    /// Returns an optional description of the server
    fn server_description(&self) -> Option<&str> {
        None
    }
}
