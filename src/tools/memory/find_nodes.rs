//! Find / open nodes tools
//!
//! `find_nodes` and `open_nodes` are the same lookup published under two
//! names.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::protocol::{json_content, McpTool, Tool};
use crate::store::GraphStore;
use crate::validation;

/// Tool for retrieving specific nodes by their names
pub struct FindNodesTool {
    store: Arc<dyn GraphStore>,
    name: &'static str,
    description: &'static str,
}

impl FindNodesTool {
    /// The `find_nodes` tool
    pub fn find(store: Arc<dyn GraphStore>) -> Self {
        Self {
            store,
            name: "find_nodes",
            description: "Find specific nodes in the knowledge graph by their names",
        }
    }

    /// The `open_nodes` alias
    pub fn open(store: Arc<dyn GraphStore>) -> Self {
        Self {
            store,
            name: "open_nodes",
            description: "Open specific nodes in the knowledge graph by their names",
        }
    }
}

#[async_trait]
impl Tool for FindNodesTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            self.name,
            self.description,
            json!({
                "type": "object",
                "properties": {
                    "names": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "An array of entity names to retrieve"
                    }
                },
                "required": ["names"]
            }),
        )
    }

    async fn execute(&self, params: Value) -> Result<Value, ToolError> {
        let names = validation::names(&params, "names")?;
        let graph = self.store.find_nodes(names).await?;
        json_content(&graph)
    }
}
