//! Delete entities tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::protocol::{ack_content, McpTool, Tool};
use crate::store::GraphStore;
use crate::validation;

/// Tool for deleting entities with their relations and observations
pub struct DeleteEntitiesTool {
    store: Arc<dyn GraphStore>,
}

impl DeleteEntitiesTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for DeleteEntitiesTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "delete_entities",
            "Delete multiple entities and their associated relations from the knowledge graph",
            json!({
                "type": "object",
                "properties": {
                    "entityNames": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "An array of entity names to delete"
                    }
                },
                "required": ["entityNames"]
            }),
        )
    }

    async fn execute(&self, params: Value) -> Result<Value, ToolError> {
        let names = validation::names(&params, "entityNames")?;
        self.store.delete_entities(names).await?;
        ack_content("Entities deleted successfully")
    }
}
