//! Argument coercion for tool calls
//!
//! Raw JSON arguments are turned into typed requests here. One malformed
//! element rejects the whole call, so nothing is partially applied.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{dedup_preserving_order, Entity, ObservationAddition, ObservationDeletion, Relation};

/// Deserialize the required argument `key`
pub fn required<T: DeserializeOwned>(params: &Value, key: &'static str) -> Result<T, ValidationError> {
    let raw = params
        .get(key)
        .filter(|v| !v.is_null())
        .cloned()
        .ok_or(ValidationError::MissingArgument(key))?;
    serde_json::from_value(raw).map_err(|source| ValidationError::InvalidArgument {
        argument: key,
        source,
    })
}

fn not_blank(
    value: &str,
    argument: &'static str,
    field: &'static str,
    index: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::BlankField {
            argument,
            field,
            index,
        })
    } else {
        Ok(())
    }
}

pub fn entities(params: &Value) -> Result<Vec<Entity>, ValidationError> {
    let entities: Vec<Entity> = required(params, "entities")?;
    entities
        .into_iter()
        .enumerate()
        .map(|(i, mut entity)| {
            not_blank(&entity.name, "entities", "name", i)?;
            not_blank(&entity.entity_type, "entities", "type", i)?;
            entity.observations = dedup_preserving_order(entity.observations);
            Ok(entity)
        })
        .collect()
}

pub fn relations(params: &Value) -> Result<Vec<Relation>, ValidationError> {
    let relations: Vec<Relation> = required(params, "relations")?;
    for (i, relation) in relations.iter().enumerate() {
        not_blank(&relation.source, "relations", "source", i)?;
        not_blank(&relation.target, "relations", "target", i)?;
        not_blank(&relation.relation_type, "relations", "relationType", i)?;
    }
    Ok(relations)
}

/// Additions grouped per entity, with repeated contents collapsed
pub fn observation_additions(params: &Value) -> Result<Vec<ObservationAddition>, ValidationError> {
    let additions: Vec<ObservationAddition> = required(params, "observations")?;
    let mut merged: Vec<ObservationAddition> = Vec::with_capacity(additions.len());

    for (i, addition) in additions.into_iter().enumerate() {
        not_blank(&addition.entity_name, "observations", "entityName", i)?;
        match merged.iter_mut().find(|m| m.entity_name == addition.entity_name) {
            Some(existing) => existing.contents.extend(addition.contents),
            None => merged.push(addition),
        }
    }

    for addition in &mut merged {
        addition.contents = dedup_preserving_order(std::mem::take(&mut addition.contents));
    }
    Ok(merged)
}

pub fn observation_deletions(params: &Value) -> Result<Vec<ObservationDeletion>, ValidationError> {
    required(params, "deletions")
}

pub fn names(params: &Value, key: &'static str) -> Result<Vec<String>, ValidationError> {
    required(params, key)
}

pub fn query(params: &Value) -> Result<String, ValidationError> {
    required(params, "query")
}
