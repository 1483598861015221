//! Knowledge graph container type

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Entity, Relation};

/// Entities plus the relations between them, as returned by graph reads
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KnowledgeGraph {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl KnowledgeGraph {
    /// Create an empty knowledge graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a knowledge graph with entities and relations
    pub fn with_data(entities: Vec<Entity>, relations: Vec<Relation>) -> Self {
        Self { entities, relations }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// Look up an entity by name
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name == name)
    }

    /// Entities selected by `keep` and every relation with at least one
    /// selected endpoint
    pub fn subgraph(&self, keep: impl Fn(&Entity) -> bool) -> KnowledgeGraph {
        let entities: Vec<Entity> = self.entities.iter().filter(|e| keep(e)).cloned().collect();
        let names: HashSet<&str> = entities.iter().map(|e| e.name.as_str()).collect();
        let relations = self
            .relations
            .iter()
            .filter(|r| names.contains(r.source.as_str()) || names.contains(r.target.as_str()))
            .cloned()
            .collect();
        KnowledgeGraph::with_data(entities, relations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> KnowledgeGraph {
        KnowledgeGraph::with_data(
            vec![
                Entity::new("a", "T"),
                Entity::new("b", "T"),
                Entity::new("c", "T"),
            ],
            vec![Relation::new("a", "b", "R"), Relation::new("b", "c", "R")],
        )
    }

    #[test]
    fn test_subgraph_keeps_incident_relations() {
        let sub = chain().subgraph(|e| e.name == "a");
        assert_eq!(sub.entities, vec![Entity::new("a", "T")]);
        assert_eq!(sub.relations, vec![Relation::new("a", "b", "R")]);
    }

    #[test]
    fn test_subgraph_of_nothing_is_empty() {
        let sub = chain().subgraph(|_| false);
        assert_eq!(sub.entity_count(), 0);
        assert_eq!(sub.relation_count(), 0);
    }

    #[test]
    fn test_entity_mut_edits_in_place() {
        let mut graph = chain();
        graph.entity_mut("b").unwrap().observations.push("x".into());
        assert_eq!(graph.entity("b").unwrap().observations, vec!["x"]);
        assert!(graph.entity_mut("missing").is_none());
    }
}
