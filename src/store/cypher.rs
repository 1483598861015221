//! Cypher statements used by the Neo4j store
//!
//! Values always travel as parameters. Relation types cannot be
//! parameterized, so they go through [`quote_label`] before being placed
//! in the statement text.

/// Unique constraint backing entity upserts
pub const ENSURE_NAME_CONSTRAINT: &str =
    "CREATE CONSTRAINT memory_name_unique IF NOT EXISTS FOR (m:Memory) REQUIRE m.name IS UNIQUE";

pub const PING: &str = "RETURN 1 AS ok";

pub const UPSERT_ENTITIES: &str = "
UNWIND $entities AS entity
MERGE (e:Memory {name: entity.name})
SET e.type = entity.type, e.observations = entity.observations
";

pub const ADD_OBSERVATIONS: &str = "
UNWIND $observations AS obs
MATCH (e:Memory {name: obs.entityName})
WITH e, [o IN obs.contents WHERE NOT o IN coalesce(e.observations, [])] AS new
SET e.observations = coalesce(e.observations, []) + new
RETURN e.name AS entityName, new AS addedObservations
";

pub const DELETE_ENTITIES: &str = "
UNWIND $names AS name
MATCH (e:Memory {name: name})
DETACH DELETE e
";

pub const DELETE_OBSERVATIONS: &str = "
UNWIND $deletions AS d
MATCH (e:Memory {name: d.entityName})
SET e.observations = [o IN coalesce(e.observations, []) WHERE NOT o IN d.observations]
";

const LOAD_GRAPH_TAIL: &str = "
OPTIONAL MATCH (e)-[r]-(:Memory)
WITH collect(DISTINCT e) AS nodes, collect(DISTINCT r) AS rels
RETURN [n IN nodes | {
           name: n.name,
           type: coalesce(n.type, ''),
           observations: coalesce(n.observations, [])
       }] AS entities,
       [r IN rels | {
           source: startNode(r).name,
           target: endNode(r).name,
           relationType: type(r)
       }] AS relations
";

/// Which entities a graph read starts from
pub enum GraphFilter {
    All,
    Search,
    Names,
}

/// Graph read returning one row with `entities` and `relations` columns
pub fn load_graph(filter: GraphFilter) -> String {
    let predicate = match filter {
        GraphFilter::All => "true",
        GraphFilter::Search => {
            "toLower(e.name) CONTAINS $query
   OR toLower(coalesce(e.type, '')) CONTAINS $query
   OR any(o IN coalesce(e.observations, []) WHERE toLower(o) CONTAINS $query)"
        }
        GraphFilter::Names => "e.name IN $names",
    };
    format!("MATCH (e:Memory)\nWHERE {predicate}{LOAD_GRAPH_TAIL}")
}

pub fn upsert_relations(relation_type: &str) -> String {
    format!(
        "
UNWIND $relations AS rel
MATCH (a:Memory {{name: rel.source}})
MATCH (b:Memory {{name: rel.target}})
MERGE (a)-[:{}]->(b)
",
        quote_label(relation_type)
    )
}

pub fn delete_relations(relation_type: &str) -> String {
    format!(
        "
UNWIND $relations AS rel
MATCH (a:Memory {{name: rel.source}})-[r:{}]->(b:Memory {{name: rel.target}})
DELETE r
",
        quote_label(relation_type)
    )
}

/// Quote a relation type as a Cypher identifier.
///
/// Any text is accepted; embedded backticks are doubled so the label can
/// never terminate the identifier early.
pub fn quote_label(label: &str) -> String {
    format!("`{}`", label.replace('`', "``"))
}
