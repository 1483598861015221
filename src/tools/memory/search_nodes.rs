//! Search nodes tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::protocol::{json_content, McpTool, Tool};
use crate::store::GraphStore;
use crate::validation;

/// Tool for substring search over names, types and observations
pub struct SearchNodesTool {
    store: Arc<dyn GraphStore>,
}

impl SearchNodesTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SearchNodesTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "search_nodes",
            "Search for nodes in the knowledge graph based on a query. Matches entity names, \
             types and observation content as a case-insensitive substring. No index is used: \
             every entity is scanned, so cost grows with the size of the graph",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The text to look for"
                    }
                },
                "required": ["query"]
            }),
        )
    }

    async fn execute(&self, params: Value) -> Result<Value, ToolError> {
        let query = validation::query(&params)?;
        let graph = self.store.search_nodes(&query).await?;
        json_content(&graph)
    }
}
