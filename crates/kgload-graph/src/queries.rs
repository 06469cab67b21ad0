//! Read-back queries used to verify a load.

use neo4rs::query;

use kgload_core::Dataset;

use crate::client::{GraphClient, GraphError};

/// Which identity key to look a stored node up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKey {
    /// Relationship-list nodes are keyed by `name`.
    Name,
    /// Standard-shape nodes are keyed by `id`.
    Id,
}

impl IdentityKey {
    fn property(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Id => "id",
        }
    }
}

/// A lightweight view of a stored `Entity` node.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredNode {
    pub id: Option<String>,
    pub name: String,
    pub node_type: String,
    pub dataset: String,
}

impl GraphClient {
    /// Count nodes tagged with a dataset.
    pub async fn count_nodes(&self, dataset: &Dataset) -> Result<i64, GraphError> {
        let q = query(
            "MATCH (n {dataset: $dataset})
             RETURN count(n) AS cnt",
        )
        .param("dataset", dataset.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Count relationships tagged with a dataset.
    pub async fn count_relationships(&self, dataset: &Dataset) -> Result<i64, GraphError> {
        let q = query(
            "MATCH ()-[r:RELATES {dataset: $dataset}]->()
             RETURN count(r) AS cnt",
        )
        .param("dataset", dataset.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Look a stored node up by its identity key within a dataset.
    pub async fn find_node(
        &self,
        dataset: &Dataset,
        key: IdentityKey,
        value: &str,
    ) -> Result<Option<StoredNode>, GraphError> {
        let property = key.property();
        let cypher = format!(
            "MATCH (n:Entity {{dataset: $dataset, {property}: $value}})
             RETURN n LIMIT 1"
        );

        let q = query(&cypher)
            .param("dataset", dataset.to_string())
            .param("value", value.to_string());

        match self.query_one(q).await? {
            Some(row) => {
                let node: neo4rs::Node = row.get("n").map_err(|e| {
                    GraphError::Serialization(format!("Failed to deserialize node: {e}"))
                })?;
                Ok(Some(neo4j_node_to_stored(&node)))
            }
            None => Ok(None),
        }
    }

    /// Relation names of every relationship from `start` to `end` (by name).
    pub async fn relations_between(
        &self,
        dataset: &Dataset,
        start: &str,
        end: &str,
    ) -> Result<Vec<String>, GraphError> {
        let q = query(
            "MATCH (a:Entity {name: $start, dataset: $dataset})
                   -[r:RELATES {dataset: $dataset}]->
                   (b:Entity {name: $end, dataset: $dataset})
             RETURN r.type AS relation
             ORDER BY relation",
        )
        .param("dataset", dataset.to_string())
        .param("start", start.to_string())
        .param("end", end.to_string());

        let rows = self.query_rows(q).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get::<String>("relation").ok())
            .collect())
    }
}

fn neo4j_node_to_stored(node: &neo4rs::Node) -> StoredNode {
    StoredNode {
        id: node.get::<String>("id").ok(),
        name: node.get("name").unwrap_or_default(),
        node_type: node.get("type").unwrap_or_default(),
        dataset: node.get("dataset").unwrap_or_default(),
    }
}
