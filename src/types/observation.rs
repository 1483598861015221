//! Observation types for entity updates

use serde::{Deserialize, Serialize};

/// Observations to add to an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationAddition {
    #[serde(rename = "entityName")]
    pub entity_name: String,
    pub contents: Vec<String>,
}

impl ObservationAddition {
    /// Create a new addition for one entity
    pub fn new(entity_name: impl Into<String>, contents: Vec<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            contents,
        }
    }
}

/// Observations that were actually added (not already present)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedObservations {
    #[serde(rename = "entityName")]
    pub entity_name: String,
    #[serde(rename = "addedObservations")]
    pub added_observations: Vec<String>,
}

/// Observation deletion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationDeletion {
    #[serde(rename = "entityName")]
    pub entity_name: String,
    pub observations: Vec<String>,
}

impl ObservationDeletion {
    /// Create a new deletion for one entity
    pub fn new(entity_name: impl Into<String>, observations: Vec<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            observations,
        }
    }
}
