//! Add observations tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::protocol::{json_content, McpTool, Tool};
use crate::store::GraphStore;
use crate::validation;

/// Tool for adding observations to existing entities
pub struct AddObservationsTool {
    store: Arc<dyn GraphStore>,
}

impl AddObservationsTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for AddObservationsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "add_observations",
            "Add new observations to existing entities in the knowledge graph",
            json!({
                "type": "object",
                "properties": {
                    "observations": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "entityName": { "type": "string", "description": "The name of the entity to add the observations to" },
                                "contents": {
                                    "type": "array",
                                    "items": { "type": "string" },
                                    "description": "The observations to add"
                                }
                            },
                            "required": ["entityName", "contents"]
                        }
                    }
                },
                "required": ["observations"]
            }),
        )
    }

    async fn execute(&self, params: Value) -> Result<Value, ToolError> {
        let additions = validation::observation_additions(&params)?;
        let added = self.store.add_observations(additions).await?;
        json_content(&added)
    }
}
