//! Neo4j-backed store over a pooled Bolt connection

use std::collections::BTreeMap;

use async_trait::async_trait;
use neo4rs::{query, BoltMap, BoltType, ConfigBuilder, Graph, Query, Row};
use tracing::{debug, info};

use super::cypher::{self, GraphFilter};
use super::GraphStore;
use crate::config::Neo4jSettings;
use crate::error::StoreResult;
use crate::types::{
    AddedObservations, Entity, KnowledgeGraph, ObservationAddition, ObservationDeletion, Relation,
};

/// Store holding the process-wide Neo4j connection pool.
///
/// `neo4rs::Graph` is cheap to clone and hands each query its own pooled
/// connection, returned when the query finishes or fails.
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connect, verify connectivity and ensure the schema exists
    pub async fn connect(settings: &Neo4jSettings) -> StoreResult<Self> {
        let config = ConfigBuilder::default()
            .uri(settings.url.as_str())
            .user(settings.username.as_str())
            .password(settings.password.as_str())
            .db(settings.database.as_str())
            .max_connections(settings.max_connections)
            .build()?;

        let graph = Graph::connect(config).await?;
        let store = Self { graph };
        store.graph.run(query(cypher::PING)).await?;
        info!(url = %settings.url, database = %settings.database, "connected to Neo4j");

        store.graph.run(query(cypher::ENSURE_NAME_CONSTRAINT)).await?;
        debug!("name uniqueness constraint ensured");
        Ok(store)
    }

    async fn load_graph(&self, q: Query) -> StoreResult<KnowledgeGraph> {
        let mut rows = self.graph.execute(q).await?;
        match rows.next().await? {
            Some(row) => graph_from_row(&row),
            None => Ok(KnowledgeGraph::new()),
        }
    }

    /// Run one statement per relation type inside a single transaction
    async fn run_per_relation_type(
        &self,
        relations: &[Relation],
        statement: fn(&str) -> String,
    ) -> StoreResult<()> {
        let queries: Vec<Query> = statements_per_type(relations, statement)
            .into_iter()
            .map(|(text, params)| query(&text).param("relations", params))
            .collect();

        // Dropping the transaction on an early return rolls it back
        let mut txn = self.graph.start_txn().await?;
        txn.run_queries(queries).await?;
        txn.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn upsert_entities(&self, entities: Vec<Entity>) -> StoreResult<Vec<Entity>> {
        if entities.is_empty() {
            return Ok(entities);
        }
        let params: Vec<BoltType> = entities.iter().map(entity_param).collect();
        self.graph
            .run(query(cypher::UPSERT_ENTITIES).param("entities", params))
            .await?;
        debug!(count = entities.len(), "upserted entities");
        Ok(entities)
    }

    async fn upsert_relations(&self, relations: Vec<Relation>) -> StoreResult<Vec<Relation>> {
        if relations.is_empty() {
            return Ok(relations);
        }
        self.run_per_relation_type(&relations, cypher::upsert_relations)
            .await?;
        debug!(count = relations.len(), "upserted relations");
        Ok(relations)
    }

    async fn add_observations(
        &self,
        additions: Vec<ObservationAddition>,
    ) -> StoreResult<Vec<AddedObservations>> {
        if additions.is_empty() {
            return Ok(Vec::new());
        }
        let params: Vec<BoltType> = additions
            .iter()
            .map(|a| {
                bolt_map([
                    ("entityName", a.entity_name.clone().into()),
                    ("contents", a.contents.clone().into()),
                ])
            })
            .collect();

        let mut rows = self
            .graph
            .execute(query(cypher::ADD_OBSERVATIONS).param("observations", params))
            .await?;
        let mut added = Vec::new();
        while let Some(row) = rows.next().await? {
            added.push(added_from_row(&row)?);
        }
        Ok(added)
    }

    async fn delete_entities(&self, names: Vec<String>) -> StoreResult<()> {
        if names.is_empty() {
            return Ok(());
        }
        self.graph
            .run(query(cypher::DELETE_ENTITIES).param("names", names))
            .await?;
        Ok(())
    }

    async fn delete_observations(&self, deletions: Vec<ObservationDeletion>) -> StoreResult<()> {
        if deletions.is_empty() {
            return Ok(());
        }
        let params: Vec<BoltType> = deletions
            .iter()
            .map(|d| {
                bolt_map([
                    ("entityName", d.entity_name.clone().into()),
                    ("observations", d.observations.clone().into()),
                ])
            })
            .collect();
        self.graph
            .run(query(cypher::DELETE_OBSERVATIONS).param("deletions", params))
            .await?;
        Ok(())
    }

    async fn delete_relations(&self, relations: Vec<Relation>) -> StoreResult<()> {
        if relations.is_empty() {
            return Ok(());
        }
        self.run_per_relation_type(&relations, cypher::delete_relations)
            .await
    }

    async fn read_graph(&self) -> StoreResult<KnowledgeGraph> {
        self.load_graph(query(&cypher::load_graph(GraphFilter::All)))
            .await
    }

    async fn search_nodes(&self, needle: &str) -> StoreResult<KnowledgeGraph> {
        let q = query(&cypher::load_graph(GraphFilter::Search)).param("query", needle.to_lowercase());
        self.load_graph(q).await
    }

    async fn find_nodes(&self, names: Vec<String>) -> StoreResult<KnowledgeGraph> {
        if names.is_empty() {
            return Ok(KnowledgeGraph::new());
        }
        let q = query(&cypher::load_graph(GraphFilter::Names)).param("names", names);
        self.load_graph(q).await
    }

    fn backend(&self) -> &'static str {
        "neo4j"
    }
}

/// Decode the single row of a graph read
fn graph_from_row(row: &Row) -> StoreResult<KnowledgeGraph> {
    Ok(KnowledgeGraph::with_data(
        row.get::<Vec<Entity>>("entities")?,
        row.get::<Vec<Relation>>("relations")?,
    ))
}

fn added_from_row(row: &Row) -> StoreResult<AddedObservations> {
    Ok(row.to::<AddedObservations>()?)
}

/// Group relations by type, pairing each type's statement with its
/// `$relations` parameter. Types come out in sorted order.
fn statements_per_type(
    relations: &[Relation],
    statement: fn(&str) -> String,
) -> Vec<(String, Vec<BoltType>)> {
    let mut by_type: BTreeMap<&str, Vec<BoltType>> = BTreeMap::new();
    for relation in relations {
        by_type
            .entry(relation.relation_type.as_str())
            .or_default()
            .push(relation_param(relation));
    }
    by_type
        .into_iter()
        .map(|(relation_type, params)| (statement(relation_type), params))
        .collect()
}

fn bolt_map<const N: usize>(fields: [(&str, BoltType); N]) -> BoltType {
    let mut map = BoltMap::new();
    for (key, value) in fields {
        map.put(key.into(), value);
    }
    BoltType::Map(map)
}

fn entity_param(entity: &Entity) -> BoltType {
    bolt_map([
        ("name", entity.name.clone().into()),
        ("type", entity.entity_type.clone().into()),
        ("observations", entity.observations.clone().into()),
    ])
}

fn relation_param(relation: &Relation) -> BoltType {
    bolt_map([
        ("source", relation.source.clone().into()),
        ("target", relation.target.clone().into()),
    ])
}
