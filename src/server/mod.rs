//! MCP server implementation
//!
//! `McpServer` routes JSON-RPC messages to MCP methods. It is transport
//! agnostic: stdio, SSE and streamable HTTP all feed it raw messages and
//! forward whatever it answers.

pub mod http;
pub mod sse;
pub mod stdio;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ServerInfo, INTERNAL_ERROR, PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;

/// MCP method router over a tool registry
pub struct McpServer {
    server_info: ServerInfo,
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a new MCP server with default server info
    pub fn new(registry: ToolRegistry) -> Self {
        Self::with_info(ServerInfo::default(), registry)
    }

    /// Create a new MCP server with custom server info
    pub fn with_info(server_info: ServerInfo, registry: ToolRegistry) -> Self {
        Self {
            server_info,
            registry,
        }
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Get the number of registered tools
    pub fn tool_count(&self) -> usize {
        self.registry.tool_count()
    }

    /// Handle one raw message. Returns `None` for notifications.
    pub async fn handle_message(&self, raw: &str) -> Option<Value> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => return Some(encode(&JsonRpcError::parse_error(e.to_string()))),
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(encode(&JsonRpcError::invalid_request(id, &e.to_string()))),
        }
    }

    /// Handle a parsed JSON-RPC request
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<Value> {
        let id = request.id.clone().unwrap_or(Value::Null);

        if !request.is_valid() {
            return Some(encode(&JsonRpcError::invalid_request(
                id,
                "jsonrpc must be '2.0'",
            )));
        }

        let is_notification = request.is_notification();
        debug!(method = %request.method, "handling request");
        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize_result()),
            "notifications/initialized" => return None,
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => self.call_tool(id.clone(), request.params).await,
            _ => Err(JsonRpcError::method_not_found(id.clone(), &request.method)),
        };

        if is_notification {
            return None;
        }

        Some(match outcome {
            Ok(result) => encode(&JsonRpcResponse::new(id, result)),
            Err(error) => encode(&error),
        })
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": self.server_info.name,
                "version": self.server_info.version
            }
        })
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params =
            params.ok_or_else(|| JsonRpcError::invalid_params(id.clone(), "Missing parameters"))?;

        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| JsonRpcError::invalid_params(id.clone(), "Missing tool name"))?;

        let arguments = params
            .get("arguments")
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| json!({}));

        self.registry
            .call(tool_name, arguments)
            .await
            .ok_or_else(|| JsonRpcError::unknown_tool(id, tool_name))
    }
}

fn encode<T: Serialize>(message: &T) -> Value {
    serde_json::to_value(message).unwrap_or_else(|e| {
        json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": { "code": INTERNAL_ERROR, "message": e.to_string() }
        })
    })
}
