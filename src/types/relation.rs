//! Relation types for the knowledge graph

use serde::{Deserialize, Serialize};

/// Directed, typed edge between two entities
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    #[serde(alias = "from")]
    pub source: String,
    #[serde(alias = "to")]
    pub target: String,
    #[serde(rename = "relationType")]
    pub relation_type: String,
}

impl Relation {
    /// Create a new relation
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relation_type: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation_type: relation_type.into(),
        }
    }
}
