//! MCP (Model Context Protocol) types

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ToolError;

/// Protocol revision announced during `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP Tool definition
#[derive(Serialize, Debug, Clone)]
pub struct McpTool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl McpTool {
    /// Create a new tool definition
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Server information for MCP handshake
#[derive(Clone, Debug)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    /// Create new server info
    pub fn new(name: String, version: String) -> Self {
        Self { name, version }
    }
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "mcp-neo4j-memory".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Trait for MCP tools
///
/// All tools must implement this trait to be registered with the tool
/// registry. `execute` may fail; the registry turns the failure into an
/// error payload.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition for tools/list
    fn definition(&self) -> McpTool;

    /// Execute the tool with the given arguments
    async fn execute(&self, params: Value) -> Result<Value, ToolError>;

    fn name(&self) -> String {
        self.definition().name
    }
}

/// Wrap a serializable result as pretty JSON text content
pub fn json_content<T: Serialize>(data: &T) -> Result<Value, ToolError> {
    Ok(json!({
        "content": [{
            "type": "text",
            "text": serde_json::to_string_pretty(data)?
        }]
    }))
}

/// Acknowledgement for operations without a result
pub fn ack_content(message: &str) -> Result<Value, ToolError> {
    json_content(&json!({ "status": "ok", "message": message }))
}

/// Error content returned in place of a result
pub fn error_content(error: &ToolError) -> Value {
    let payload = json!({
        "status": "error",
        "kind": error.kind(),
        "message": error.to_string(),
    });
    json!({
        "content": [{
            "type": "text",
            "text": serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
        }],
        "isError": true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_ack_content_is_json() {
        let value = ack_content("done").unwrap();
        let text = value["content"][0]["text"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, json!({"status": "ok", "message": "done"}));
    }

    #[test]
    fn test_error_content_flags_error() {
        let error: ToolError = ValidationError::MissingArgument("names").into();
        let value = error_content(&error);
        assert_eq!(value["isError"], true);
        let parsed: Value =
            serde_json::from_str(value["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(parsed["kind"], "validation");
        assert_eq!(parsed["status"], "error");
    }
}
