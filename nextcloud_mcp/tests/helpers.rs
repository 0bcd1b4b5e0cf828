//! Shared test helpers for nextcloud_mcp tests.

#![allow(dead_code)]

use nextcloud_core::ConnectionContext;
use nextcloud_dav::NextcloudClient;
use nextcloud_mcp::NextcloudMcpServer;
use rmcp::model::{CallToolResult, JsonObject, RawContent};
use serde_json::Value;

/// Extract the text content from a CallToolResult.
pub fn get_text(result: &CallToolResult) -> String {
    assert_eq!(result.content.len(), 1, "Expected exactly one content item");
    match &result.content[0].raw {
        RawContent::Text(text_content) => text_content.text.clone(),
        _ => panic!("Expected text content"),
    }
}

/// Parse the JSON envelope carried in a CallToolResult.
pub fn get_envelope(result: &CallToolResult) -> Value {
    serde_json::from_str(&get_text(result)).expect("Envelope is not JSON")
}

/// Check if the result is a success.
pub fn is_success(result: &CallToolResult) -> bool {
    result.is_error == Some(false)
}

/// Check if the result is an error.
pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

/// Turn a JSON object literal into tool arguments.
pub fn args(value: Value) -> Option<JsonObject> {
    match value {
        Value::Object(map) => Some(map),
        _ => panic!("Arguments must be a JSON object"),
    }
}

/// Create a server whose client talks to the given mock server.
pub fn server_for(mock: &mockito::Server) -> NextcloudMcpServer {
    let context = ConnectionContext::new(&mock.url(), "alice", "secret").unwrap();
    NextcloudMcpServer::new(NextcloudClient::new(context).unwrap())
}
