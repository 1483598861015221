//! Delete relations tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::protocol::{ack_content, McpTool, Tool};
use crate::store::GraphStore;
use crate::validation;

/// Tool for deleting relations from the knowledge graph
pub struct DeleteRelationsTool {
    store: Arc<dyn GraphStore>,
}

impl DeleteRelationsTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for DeleteRelationsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "delete_relations",
            "Delete multiple relations from the knowledge graph",
            json!({
                "type": "object",
                "properties": {
                    "relations": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "source": { "type": "string", "description": "The source entity name" },
                                "target": { "type": "string", "description": "The target entity name" },
                                "relationType": { "type": "string", "description": "The type of relation" }
                            },
                            "required": ["source", "target", "relationType"]
                        },
                        "description": "An array of relations to delete"
                    }
                },
                "required": ["relations"]
            }),
        )
    }

    async fn execute(&self, params: Value) -> Result<Value, ToolError> {
        let relations = validation::relations(&params)?;
        self.store.delete_relations(relations).await?;
        ack_content("Relations deleted successfully")
    }
}
