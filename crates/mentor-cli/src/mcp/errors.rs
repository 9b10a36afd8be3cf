//! Error handling utilities for MCP server

use rmcp::ErrorData;

/// Converts a front-end error into an MCP internal error.
pub fn to_mcp_error(message: &str, error: &anyhow::Error) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error:#}"), None)
}
