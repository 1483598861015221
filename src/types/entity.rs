//! Entity types for the knowledge graph

use serde::{Deserialize, Serialize};

/// Entity in the knowledge graph, keyed by `name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(rename = "type", alias = "entityType")]
    pub entity_type: String,
    #[serde(default)]
    pub observations: Vec<String>,
}

impl Entity {
    /// Create a new entity without observations
    pub fn new(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_type: entity_type.into(),
            observations: Vec::new(),
        }
    }

    /// Create a new entity with observations
    pub fn with_observations(
        name: impl Into<String>,
        entity_type: impl Into<String>,
        observations: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            entity_type: entity_type.into(),
            observations,
        }
    }

    /// Check whether the name, type or any observation contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.entity_type.to_lowercase().contains(needle)
            || self
                .observations
                .iter()
                .any(|o| o.to_lowercase().contains(needle))
    }
}
