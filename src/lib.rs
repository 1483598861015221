//! Neo4j Memory Bridge
//!
//! A knowledge graph memory server implementing the Model Context Protocol
//! (MCP) on top of a Neo4j database.
//!
//! # Features
//!
//! - **10 MCP Tools**: entity, relation and observation CRUD, graph reads,
//!   search and lookup by name
//! - **Pooled Neo4j access**: one Bolt connection pool per process
//! - **Three transports**: stdio, HTTP+SSE and streamable HTTP
//! - **TLS when available**: plaintext fallback when certificates are missing
//!
//! # Modules
//!
//! - `types`: Core data structures (Entity, Relation, KnowledgeGraph)
//! - `store`: Graph store trait with Neo4j and in-memory backends
//! - `validation`: Tool argument coercion
//! - `tools`: MCP tool implementations and the tool registry
//! - `protocol`: MCP and JSON-RPC protocol types
//! - `server`: MCP method routing and transports
//! - `config`, `error`, `logging`: runtime plumbing
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use neo4j_memory_bridge::{McpServer, MemoryStore, ToolRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = ToolRegistry::with_store(Arc::new(MemoryStore::new()));
//!     let server = Arc::new(McpServer::new(registry));
//!     neo4j_memory_bridge::server::stdio::serve(server).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod server;
pub mod store;
pub mod tools;
pub mod types;
pub mod validation;

// Re-export commonly used items at crate root
pub use error::{BridgeError, StoreError, ToolError, ValidationError};
pub use protocol::{McpTool, ServerInfo, Tool};
pub use server::McpServer;
pub use store::{GraphStore, MemoryStore, Neo4jStore};
pub use tools::ToolRegistry;
pub use types::{
    AddedObservations, Entity, KnowledgeGraph, ObservationAddition, ObservationDeletion, Relation,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
