//! Read graph tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::protocol::{json_content, McpTool, Tool};
use crate::store::GraphStore;

/// Tool for reading the entire knowledge graph
pub struct ReadGraphTool {
    store: Arc<dyn GraphStore>,
}

impl ReadGraphTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ReadGraphTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "read_graph",
            "Read the entire knowledge graph",
            json!({
                "type": "object",
                "properties": {}
            }),
        )
    }

    async fn execute(&self, _params: Value) -> Result<Value, ToolError> {
        let graph = self.store.read_graph().await?;
        json_content(&graph)
    }
}
