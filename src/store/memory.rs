//! In-process store with the same semantics as the Neo4j store
//!
//! Used by tests and by `--store memory` for running without a database.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::GraphStore;
use crate::error::StoreResult;
use crate::types::{
    AddedObservations, Entity, KnowledgeGraph, ObservationAddition, ObservationDeletion, Relation,
};

/// Knowledge graph kept behind a read-write lock.
///
/// Every operation takes the lock once, so each call is atomic.
#[derive(Default)]
pub struct MemoryStore {
    graph: RwLock<KnowledgeGraph>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn subgraph(&self, keep: impl Fn(&Entity) -> bool) -> KnowledgeGraph {
        self.graph.read().subgraph(keep)
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn upsert_entities(&self, entities: Vec<Entity>) -> StoreResult<Vec<Entity>> {
        let mut graph = self.graph.write();
        for entity in &entities {
            match graph.entity_mut(&entity.name) {
                Some(existing) => {
                    existing.entity_type = entity.entity_type.clone();
                    existing.observations = entity.observations.clone();
                }
                None => graph.entities.push(entity.clone()),
            }
        }
        Ok(entities)
    }

    async fn upsert_relations(&self, relations: Vec<Relation>) -> StoreResult<Vec<Relation>> {
        let mut graph = self.graph.write();
        let names: HashSet<String> = graph.entities.iter().map(|e| e.name.clone()).collect();
        let mut existing: HashSet<Relation> = graph.relations.iter().cloned().collect();

        for relation in &relations {
            if names.contains(&relation.source)
                && names.contains(&relation.target)
                && existing.insert(relation.clone())
            {
                graph.relations.push(relation.clone());
            }
        }
        Ok(relations)
    }

    async fn add_observations(
        &self,
        additions: Vec<ObservationAddition>,
    ) -> StoreResult<Vec<AddedObservations>> {
        let mut graph = self.graph.write();
        let mut added = Vec::new();

        for addition in additions {
            if let Some(entity) = graph.entity_mut(&addition.entity_name) {
                let mut present: HashSet<String> = entity.observations.iter().cloned().collect();
                let new: Vec<String> = addition
                    .contents
                    .into_iter()
                    .filter(|c| present.insert(c.clone()))
                    .collect();
                entity.observations.extend(new.iter().cloned());
                added.push(AddedObservations {
                    entity_name: addition.entity_name,
                    added_observations: new,
                });
            }
        }
        Ok(added)
    }

    async fn delete_entities(&self, names: Vec<String>) -> StoreResult<()> {
        let mut graph = self.graph.write();
        let doomed: HashSet<String> = names.into_iter().collect();

        graph.entities.retain(|e| !doomed.contains(&e.name));
        graph
            .relations
            .retain(|r| !doomed.contains(&r.source) && !doomed.contains(&r.target));
        Ok(())
    }

    async fn delete_observations(&self, deletions: Vec<ObservationDeletion>) -> StoreResult<()> {
        let mut graph = self.graph.write();

        for deletion in deletions {
            if let Some(entity) = graph.entity_mut(&deletion.entity_name) {
                let to_remove: HashSet<String> = deletion.observations.into_iter().collect();
                entity.observations.retain(|o| !to_remove.contains(o));
            }
        }
        Ok(())
    }

    async fn delete_relations(&self, relations: Vec<Relation>) -> StoreResult<()> {
        let mut graph = self.graph.write();
        let to_delete: HashSet<Relation> = relations.into_iter().collect();
        graph.relations.retain(|r| !to_delete.contains(r));
        Ok(())
    }

    async fn read_graph(&self) -> StoreResult<KnowledgeGraph> {
        Ok(self.graph.read().clone())
    }

    async fn search_nodes(&self, query: &str) -> StoreResult<KnowledgeGraph> {
        let needle = query.to_lowercase();
        Ok(self.subgraph(|e| e.matches(&needle)))
    }

    async fn find_nodes(&self, names: Vec<String>) -> StoreResult<KnowledgeGraph> {
        let wanted: HashSet<String> = names.into_iter().collect();
        Ok(self.subgraph(|e| wanted.contains(&e.name)))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str) -> Entity {
        Entity::new(name, "Person")
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .upsert_entities(vec![person("Alice"), person("Bob"), person("Carol")])
            .await
            .unwrap();
        store
            .upsert_relations(vec![
                Relation::new("Alice", "Bob", "KNOWS"),
                Relation::new("Bob", "Carol", "KNOWS"),
            ])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_upsert_entities_is_idempotent() {
        let store = MemoryStore::new();
        let entity = Entity::with_observations("Alice", "Person", vec!["x".into()]);
        store.upsert_entities(vec![entity.clone()]).await.unwrap();
        store.upsert_entities(vec![entity.clone()]).await.unwrap();

        let graph = store.read_graph().await.unwrap();
        assert_eq!(graph.entities, vec![entity]);
    }

    #[tokio::test]
    async fn test_upsert_entities_overwrites_fields() {
        let store = MemoryStore::new();
        store
            .upsert_entities(vec![Entity::with_observations("A", "Old", vec!["x".into()])])
            .await
            .unwrap();
        store
            .upsert_entities(vec![Entity::new("A", "New")])
            .await
            .unwrap();

        let graph = store.read_graph().await.unwrap();
        assert_eq!(graph.entities, vec![Entity::new("A", "New")]);
    }

    #[tokio::test]
    async fn test_relation_with_missing_endpoint_is_ignored() {
        let store = MemoryStore::new();
        store.upsert_entities(vec![person("Alice")]).await.unwrap();
        let echoed = store
            .upsert_relations(vec![Relation::new("Alice", "Ghost", "KNOWS")])
            .await
            .unwrap();

        assert_eq!(echoed.len(), 1);
        assert_eq!(store.read_graph().await.unwrap().relation_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_relations_are_merged() {
        let store = seeded().await;
        store
            .upsert_relations(vec![
                Relation::new("Alice", "Bob", "KNOWS"),
                Relation::new("Alice", "Bob", "WORKS_WITH"),
            ])
            .await
            .unwrap();

        let graph = store.read_graph().await.unwrap();
        assert_eq!(graph.relation_count(), 3);
    }

    #[tokio::test]
    async fn test_add_observations_skips_existing() {
        let store = MemoryStore::new();
        store
            .upsert_entities(vec![Entity::with_observations("a", "T", vec!["x".into()])])
            .await
            .unwrap();

        let added = store
            .add_observations(vec![ObservationAddition::new(
                "a",
                vec!["x".into(), "y".into(), "y".into()],
            )])
            .await
            .unwrap();

        assert_eq!(added[0].added_observations, vec!["y"]);
        let graph = store.read_graph().await.unwrap();
        assert_eq!(graph.entity("a").unwrap().observations, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_add_observations_unknown_entity_is_skipped() {
        let store = MemoryStore::new();
        let added = store
            .add_observations(vec![ObservationAddition::new("nobody", vec!["x".into()])])
            .await
            .unwrap();
        assert!(added.is_empty());
    }

    #[tokio::test]
    async fn test_delete_entity_cascades_relations() {
        let store = seeded().await;
        store.delete_entities(vec!["Bob".into()]).await.unwrap();

        let graph = store.read_graph().await.unwrap();
        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.relation_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_observations_unknown_entity_is_noop() {
        let store = seeded().await;
        let before = store.read_graph().await.unwrap();
        store
            .delete_observations(vec![ObservationDeletion::new("nobody", vec!["x".into()])])
            .await
            .unwrap();
        let after = store.read_graph().await.unwrap();
        assert_eq!(before.entities, after.entities);
    }

    #[tokio::test]
    async fn test_delete_relations_exact_match_only() {
        let store = seeded().await;
        store
            .delete_relations(vec![
                Relation::new("Alice", "Bob", "LIKES"),
                Relation::new("Bob", "Alice", "KNOWS"),
            ])
            .await
            .unwrap();
        assert_eq!(store.read_graph().await.unwrap().relation_count(), 2);

        store
            .delete_relations(vec![Relation::new("Alice", "Bob", "KNOWS")])
            .await
            .unwrap();
        let graph = store.read_graph().await.unwrap();
        assert_eq!(graph.relations, vec![Relation::new("Bob", "Carol", "KNOWS")]);
        assert_eq!(graph.entity_count(), 3);
    }

    #[tokio::test]
    async fn test_find_nodes_includes_incident_relations() {
        let store = seeded().await;
        let graph = store
            .find_nodes(vec!["Alice".into(), "missing".into()])
            .await
            .unwrap();

        assert_eq!(graph.entities, vec![person("Alice")]);
        assert_eq!(graph.relations, vec![Relation::new("Alice", "Bob", "KNOWS")]);
    }

    #[tokio::test]
    async fn test_search_matches_name_type_and_observations() {
        let store = MemoryStore::new();
        store
            .upsert_entities(vec![
                Entity::new("foobar", "Thing"),
                Entity::new("x", "FOOtype"),
                Entity::with_observations("y", "Thing", vec!["has foo inside".into()]),
                Entity::with_observations("z", "Thing", vec!["nothing".into()]),
            ])
            .await
            .unwrap();

        let graph = store.search_nodes("foo").await.unwrap();
        let mut names: Vec<&str> = graph.entities.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["foobar", "x", "y"]);
    }
}
