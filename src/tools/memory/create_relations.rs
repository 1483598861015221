//! Create relations tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ToolError;
use crate::protocol::{json_content, McpTool, Tool};
use crate::store::GraphStore;
use crate::validation;

/// Tool for creating relations between existing entities
pub struct CreateRelationsTool {
    store: Arc<dyn GraphStore>,
}

impl CreateRelationsTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CreateRelationsTool {
    fn definition(&self) -> McpTool {
        McpTool::new(
            "create_relations",
            "Create multiple new relations between entities in the knowledge graph. Relations should be in active voice",
            json!({
                "type": "object",
                "properties": {
                    "relations": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "source": { "type": "string", "description": "The name of the entity where the relation starts" },
                                "target": { "type": "string", "description": "The name of the entity where the relation ends" },
                                "relationType": { "type": "string", "description": "The type of the relation" }
                            },
                            "required": ["source", "target", "relationType"]
                        }
                    }
                },
                "required": ["relations"]
            }),
        )
    }

    async fn execute(&self, params: Value) -> Result<Value, ToolError> {
        let relations = validation::relations(&params)?;
        let created = self.store.upsert_relations(relations).await?;
        json_content(&created)
    }
}
