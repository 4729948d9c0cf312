//! Protocol-level errors
//!
//! `ErrorData` is reserved for requests the server cannot process at all:
//! bad parameters, unknown resources, replies that cannot be encoded.
//! Failures of the work a tool performs are reported as error results
//! instead (see [`crate::result::text_error`]).

use rmcp::ErrorData as McpError;

/// Result of a tool or resource handler
pub type McpResult<T> = Result<T, McpError>;

/// Errors that can surface as an internal protocol error
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

impl IntoMcpError for serde_json::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(format!("JSON error: {}", self), None)
    }
}

/// `.to_mcp_err()` on results whose error implements [`IntoMcpError`]
///
/// ```rust,ignore
/// let contents: ResourceContents = serde_json::from_value(value).to_mcp_err()?;
/// ```
pub trait ResultExt<T> {
    fn to_mcp_err(self) -> McpResult<T>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> McpResult<T> {
        self.map_err(IntoMcpError::into_mcp_error)
    }
}

/// Parameters outside their declared range
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

/// No resource is registered under `uri`
pub fn resource_not_found(uri: &str) -> McpError {
    McpError::resource_not_found(format!("Resource not found: {}", uri), None)
}
