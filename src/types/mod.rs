//! Data types for the memory bridge
//!
//! This module contains the knowledge graph model shared by the store
//! backends and the MCP tools.

mod entity;
mod graph;
mod observation;
mod relation;

pub use entity::Entity;
pub use graph::KnowledgeGraph;
pub use observation::{AddedObservations, ObservationAddition, ObservationDeletion};
pub use relation::Relation;

/// Remove repeated strings while keeping the first occurrence order
pub fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let values = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup_preserving_order(values), vec!["b", "a"]);
    }
}
