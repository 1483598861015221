//! Delete observations tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::protocol::{ack_content, McpTool, Tool};
use crate::store::GraphStore;
use crate::validation;

/// Tool for deleting specific observations from entities
pub struct DeleteObservationsTool {
    store: Arc<dyn GraphStore>,
}

impl DeleteObservationsTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for DeleteObservationsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "delete_observations",
            "Delete specific observations from entities in the knowledge graph",
            json!({
                "type": "object",
                "properties": {
                    "deletions": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "entityName": { "type": "string", "description": "The name of the entity containing the observations" },
                                "observations": {
                                    "type": "array",
                                    "items": { "type": "string" },
                                    "description": "An array of observations to delete"
                                }
                            },
                            "required": ["entityName", "observations"]
                        }
                    }
                },
                "required": ["deletions"]
            }),
        )
    }

    async fn execute(&self, params: Value) -> Result<Value, ToolError> {
        let deletions = validation::observation_deletions(&params)?;
        self.store.delete_observations(deletions).await?;
        ack_content("Observations deleted successfully")
    }
}
