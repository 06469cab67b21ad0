//! Write operations for the property graph.
//!
//! All writes use MERGE (upsert) semantics so reloading a graph is
//! idempotent. Nodes carry the `Entity` label and relationships the
//! `RELATES` type; the relation name lives in the `type` property, so no
//! payload value is ever spliced into Cypher text.

use std::collections::HashMap;

use neo4rs::{query, BoltType};

use kgload_core::{Dataset, EdgeRecord, NodeRecord, PropertyMap, PropertyValue, RelationshipRecord};

use crate::client::{GraphClient, GraphError};
use crate::store::GraphStore;

impl GraphStore for GraphClient {
    async fn clear_dataset(&self, dataset: &Dataset) -> Result<u64, GraphError> {
        let q = query(
            "MATCH (n {dataset: $dataset})
             DETACH DELETE n
             RETURN count(n) AS deleted",
        )
        .param("dataset", dataset.to_string());

        let deleted = match self.query_one(q).await? {
            Some(row) => row.get::<i64>("deleted").unwrap_or(0),
            None => 0,
        };
        tracing::info!(%dataset, deleted, "Cleared dataset");
        Ok(deleted.max(0) as u64)
    }

    async fn merge_relationship(
        &self,
        dataset: &Dataset,
        record: &RelationshipRecord,
    ) -> Result<bool, GraphError> {
        let q = query(
            "MERGE (a:Entity {name: $start_name, dataset: $dataset})
             ON CREATE SET a.type = $start_type, a += $start_props
             ON MATCH SET a += $start_props
             MERGE (b:Entity {name: $end_name, dataset: $dataset})
             ON CREATE SET b.type = $end_type, b += $end_props
             ON MATCH SET b += $end_props
             MERGE (a)-[r:RELATES {type: $relation, dataset: $dataset}]->(b)
             RETURN r.type AS relation",
        )
        .param("dataset", dataset.to_string())
        .param("start_name", record.start.name.clone())
        .param("start_type", record.start.resolved_type().to_string())
        .param("start_props", props_to_bolt(&record.start.properties))
        .param("end_name", record.end.name.clone())
        .param("end_type", record.end.resolved_type().to_string())
        .param("end_props", props_to_bolt(&record.end.properties))
        .param("relation", record.relation.clone());

        Ok(self.query_one(q).await?.is_some())
    }

    async fn upsert_node(&self, dataset: &Dataset, node: &NodeRecord) -> Result<(), GraphError> {
        let attributes: Vec<BoltType> = node.attributes.iter().map(value_to_bolt).collect();

        let q = query(
            "MERGE (n:Entity {id: $id, dataset: $dataset})
             SET n.name = $name, n.type = $type, n.attributes = $attributes",
        )
        .param("dataset", dataset.to_string())
        .param("id", node.id.clone())
        .param("name", node.name.clone())
        .param("type", node.node_type.clone())
        .param("attributes", attributes);

        self.run(q).await
    }

    async fn link_nodes(&self, dataset: &Dataset, edge: &EdgeRecord) -> Result<bool, GraphError> {
        let q = query(
            "MATCH (a:Entity {id: $source, dataset: $dataset})
             MATCH (b:Entity {id: $target, dataset: $dataset})
             MERGE (a)-[r:RELATES {type: $relation, dataset: $dataset}]->(b)
             SET r.weight = $weight
             RETURN r.type AS relation",
        )
        .param("dataset", dataset.to_string())
        .param("source", edge.source.clone())
        .param("target", edge.target.clone())
        .param("relation", edge.relation.clone())
        .param("weight", edge.weight);

        // No row back means one of the MATCH clauses found nothing.
        Ok(self.query_one(q).await?.is_some())
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn value_to_bolt(value: &PropertyValue) -> BoltType {
    match value {
        PropertyValue::String(s) => s.clone().into(),
        PropertyValue::Integer(i) => (*i).into(),
        PropertyValue::Float(f) => (*f).into(),
        PropertyValue::Boolean(b) => (*b).into(),
        PropertyValue::List(items) => items.iter().map(value_to_bolt).collect::<Vec<_>>().into(),
    }
}

fn props_to_bolt(props: &PropertyMap) -> HashMap<String, BoltType> {
    props
        .iter()
        .map(|(k, v)| (k.clone(), value_to_bolt(v)))
        .collect()
}
