//! Create entities tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::protocol::{json_content, McpTool, Tool};
use crate::store::GraphStore;
use crate::validation;

/// Tool for creating or merging entities by name
pub struct CreateEntitiesTool {
    store: Arc<dyn GraphStore>,
}

impl CreateEntitiesTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CreateEntitiesTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "create_entities",
            "Create multiple new entities in the knowledge graph. Existing entities with the same name are updated",
            json!({
                "type": "object",
                "properties": {
                    "entities": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string", "description": "The unique name of the entity" },
                                "type": { "type": "string", "description": "The type of the entity" },
                                "observations": {
                                    "type": "array",
                                    "items": { "type": "string" },
                                    "description": "Observations about the entity"
                                }
                            },
                            "required": ["name", "type"]
                        }
                    }
                },
                "required": ["entities"]
            }),
        )
    }

    async fn execute(&self, params: Value) -> Result<Value, ToolError> {
        let entities = validation::entities(&params)?;
        let created = self.store.upsert_entities(entities).await?;
        json_content(&created)
    }
}
