//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: stderr tracing setup and the stdio serving loop
//! - **Results**: helpers for building `CallToolResult` responses
//! - **Errors**: helpers for protocol-level `ErrorData`
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process tool dispatch

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{invalid_params, resource_not_found, IntoMcpError, McpResult, ResultExt};
pub use init::{init_tracing, serve_stdio, verbosity_level};
pub use result::{first_text, multi_success, text_error, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
