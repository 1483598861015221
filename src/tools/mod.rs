//! MCP Tools implementation
//!
//! The registry maps stable tool names to implementations and is the only
//! place tool calls are executed. Failures never leave `call`: they become
//! error payloads flagged with `isError`.

pub mod memory;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::protocol::{error_content, McpTool, Tool};
use crate::store::GraphStore;

pub use memory::{
    AddObservationsTool, CreateEntitiesTool, CreateRelationsTool, DeleteEntitiesTool,
    DeleteObservationsTool, DeleteRelationsTool, FindNodesTool, ReadGraphTool, SearchNodesTool,
};

/// Name-indexed set of tools
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every knowledge graph tool bound to `store`
    pub fn with_store(store: Arc<dyn GraphStore>) -> Self {
        let mut registry = Self::new();
        for tool in all_tools(store) {
            registry.register(tool);
        }
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        self.tools.insert(tool.name(), tool);
        self
    }

    /// Number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Definitions for tools/list, sorted by name
    pub fn definitions(&self) -> Vec<McpTool> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Run a tool. Returns `None` only when no tool has this name.
    pub async fn call(&self, name: &str, arguments: Value) -> Option<Value> {
        let tool = self.tools.get(name)?;
        debug!(tool = name, "calling tool");
        match tool.execute(arguments).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(tool = name, kind = e.kind(), error = %e, "tool call failed");
                Some(error_content(&e))
            }
        }
    }
}

/// Every knowledge graph tool bound to `store`
pub fn all_tools(store: Arc<dyn GraphStore>) -> Vec<Arc<dyn Tool>> {
    let mut tools: Vec<Arc<dyn Tool>> = Vec::with_capacity(10);
    tools.push(Arc::new(CreateEntitiesTool::new(store.clone())));
    tools.push(Arc::new(CreateRelationsTool::new(store.clone())));
    tools.push(Arc::new(AddObservationsTool::new(store.clone())));
    tools.push(Arc::new(DeleteEntitiesTool::new(store.clone())));
    tools.push(Arc::new(DeleteObservationsTool::new(store.clone())));
    tools.push(Arc::new(DeleteRelationsTool::new(store.clone())));
    tools.push(Arc::new(ReadGraphTool::new(store.clone())));
    tools.push(Arc::new(SearchNodesTool::new(store.clone())));
    tools.push(Arc::new(FindNodesTool::find(store.clone())));
    tools.push(Arc::new(FindNodesTool::open(store)));
    tools
}
