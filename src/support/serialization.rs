//! Shared serialization utilities

use rmcp::model::{CallToolResult, Content};

use crate::support::response::ToolResult;

/// Creates a `CallToolResult` from a `ToolResult`; failures set `is_error`
pub fn tool_result_to_call_result(result: &ToolResult) -> CallToolResult {
    let content = vec![Content::text(result.to_json())];
    if result.success {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    }
}
