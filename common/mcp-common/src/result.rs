//! Result helpers for MCP tool responses

use rmcp::model::{CallToolResult, Content};

/// Create a successful plain text response
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Create an error response carrying a single text item
///
/// The call itself succeeded at the protocol level, but the work the tool
/// attempted failed. The client sees `is_error: true` and the message.
pub fn text_error(text: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(text.into())])
}

/// Create a successful response with multiple content items
///
/// ```rust,ignore
/// multi_success(vec![
///     Content::image(png_base64, "image/png"),
///     Content::image(jpeg_base64, "image/jpeg"),
/// ])
/// ```
pub fn multi_success(contents: Vec<Content>) -> CallToolResult {
    CallToolResult::success(contents)
}

/// Extract the text of the first text item of a result, if any
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result
        .content
        .iter()
        .find_map(|c| c.as_text().map(|t| t.text.as_str()))
}
