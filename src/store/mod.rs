//! Graph Store Adapter
//!
//! `GraphStore` is the single seam between the MCP tools and the graph.
//! Each operation is one round trip; multi-statement writes are atomic.

mod cypher;
mod memory;
mod neo4j;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Settings, StoreKind};
use crate::error::{BridgeError, StoreResult};
use crate::types::{
    AddedObservations, Entity, KnowledgeGraph, ObservationAddition, ObservationDeletion, Relation,
};

pub use memory::MemoryStore;
pub use neo4j::Neo4jStore;

/// Knowledge graph operations shared by every backend
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Merge entities by name, overwriting type and observations
    async fn upsert_entities(&self, entities: Vec<Entity>) -> StoreResult<Vec<Entity>>;

    /// Merge relations whose endpoints both exist; others are ignored
    async fn upsert_relations(&self, relations: Vec<Relation>) -> StoreResult<Vec<Relation>>;

    /// Append observations not yet present, returning only those added
    async fn add_observations(
        &self,
        additions: Vec<ObservationAddition>,
    ) -> StoreResult<Vec<AddedObservations>>;

    /// Delete entities together with their relations and observations
    async fn delete_entities(&self, names: Vec<String>) -> StoreResult<()>;

    async fn delete_observations(&self, deletions: Vec<ObservationDeletion>) -> StoreResult<()>;

    async fn delete_relations(&self, relations: Vec<Relation>) -> StoreResult<()>;

    async fn read_graph(&self) -> StoreResult<KnowledgeGraph>;

    /// Case-insensitive substring search over name, type and observations
    async fn search_nodes(&self, query: &str) -> StoreResult<KnowledgeGraph>;

    /// Entities with exactly these names plus relations touching them
    async fn find_nodes(&self, names: Vec<String>) -> StoreResult<KnowledgeGraph>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;
}

/// Open the store selected in `settings`
pub async fn open(settings: &Settings) -> Result<Arc<dyn GraphStore>, BridgeError> {
    match settings.store {
        StoreKind::Neo4j => {
            let store = Neo4jStore::connect(&settings.neo4j()?).await?;
            Ok(Arc::new(store))
        }
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
