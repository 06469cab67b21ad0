//! In-memory `GraphStore` with Neo4j MERGE semantics, for ingestion tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

use kgload_core::{
    Dataset, EdgeRecord, NodeRecord, PropertyMap, PropertyValue, RelationshipRecord,
};
use kgload_graph::{GraphError, GraphStore};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredEdge {
    pub start: u64,
    pub end: u64,
    pub relation: String,
    pub dataset: String,
    pub weight: Option<f64>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    nodes: BTreeMap<u64, PropertyMap>,
    edges: Vec<StoredEdge>,
    clears: usize,
}

impl State {
    fn find(&self, key: &str, value: &str, dataset: &str) -> Option<u64> {
        self.nodes.iter().find_map(|(id, props)| {
            let matches = props.get(key).and_then(PropertyValue::as_str) == Some(value)
                && props.get("dataset").and_then(PropertyValue::as_str) == Some(dataset);
            matches.then_some(*id)
        })
    }

    /// Returns the node id and whether it was created.
    fn merge_node(&mut self, key: &str, value: &str, dataset: &str) -> (u64, bool) {
        if let Some(id) = self.find(key, value, dataset) {
            return (id, false);
        }
        let id = self.next_id;
        self.next_id += 1;
        let mut props = PropertyMap::new();
        props.insert(key.to_string(), PropertyValue::from(value));
        props.insert("dataset".to_string(), PropertyValue::from(dataset));
        self.nodes.insert(id, props);
        (id, true)
    }

    fn merge_edge(&mut self, start: u64, end: u64, relation: &str, dataset: &str) -> usize {
        if let Some(pos) = self.edges.iter().position(|e| {
            e.start == start && e.end == end && e.relation == relation && e.dataset == dataset
        }) {
            return pos;
        }
        self.edges.push(StoredEdge {
            start,
            end,
            relation: relation.to_string(),
            dataset: dataset.to_string(),
            weight: None,
        });
        self.edges.len() - 1
    }
}

/// Graph store backed by process memory.
///
/// Writes touching a key listed in `failing` return an error, standing in
/// for a storage-layer constraint violation.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    failing: HashSet<String>,
    fail_clear: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(keys: &[&str]) -> Self {
        Self {
            failing: keys.iter().map(|k| k.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_failing_clear() -> Self {
        Self {
            fail_clear: true,
            ..Self::default()
        }
    }

    pub fn node_count(&self, dataset: &str) -> usize {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .values()
            .filter(|p| p.get("dataset").and_then(PropertyValue::as_str) == Some(dataset))
            .count()
    }

    pub fn edge_count(&self, dataset: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.edges.iter().filter(|e| e.dataset == dataset).count()
    }

    pub fn node(&self, dataset: &str, key: &str, value: &str) -> Option<PropertyMap> {
        let state = self.state.lock().unwrap();
        state
            .find(key, value, dataset)
            .and_then(|id| state.nodes.get(&id).cloned())
    }

    /// Edges of a dataset as (start key, end key, relation, weight).
    pub fn edges(&self, dataset: &str, key: &str) -> Vec<(String, String, String, Option<f64>)> {
        let state = self.state.lock().unwrap();
        let key_of = |id: u64| {
            state
                .nodes
                .get(&id)
                .and_then(|p| p.get(key))
                .and_then(PropertyValue::as_str)
                .unwrap_or_default()
                .to_string()
        };
        state
            .edges
            .iter()
            .filter(|e| e.dataset == dataset)
            .map(|e| (key_of(e.start), key_of(e.end), e.relation.clone(), e.weight))
            .collect()
    }

    pub fn clears(&self) -> usize {
        self.state.lock().unwrap().clears
    }

    fn check(&self, key: &str) -> Result<(), GraphError> {
        if self.failing.contains(key) {
            return Err(GraphError::Serialization(format!(
                "constraint violation on {key}"
            )));
        }
        Ok(())
    }
}

impl GraphStore for MemoryStore {
    async fn clear_dataset(&self, dataset: &Dataset) -> Result<u64, GraphError> {
        if self.fail_clear {
            return Err(GraphError::Connection("session expired".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        state.clears += 1;

        let doomed: HashSet<u64> = state
            .nodes
            .iter()
            .filter(|(_, p)| p.get("dataset").and_then(PropertyValue::as_str) == Some(dataset.as_str()))
            .map(|(id, _)| *id)
            .collect();
        state.nodes.retain(|id, _| !doomed.contains(id));
        state
            .edges
            .retain(|e| !doomed.contains(&e.start) && !doomed.contains(&e.end));
        Ok(doomed.len() as u64)
    }

    async fn merge_relationship(
        &self,
        dataset: &Dataset,
        record: &RelationshipRecord,
    ) -> Result<bool, GraphError> {
        self.check(&record.start.name)?;
        self.check(&record.end.name)?;

        let mut state = self.state.lock().unwrap();
        let mut ids = Vec::with_capacity(2);
        for endpoint in [&record.start, &record.end] {
            let (id, created) = state.merge_node("name", &endpoint.name, dataset.as_str());
            let props = state.nodes.get_mut(&id).expect("merged node exists");
            if created {
                props.insert("type".to_string(), PropertyValue::from(endpoint.resolved_type()));
            }
            props.extend(endpoint.properties.clone());
            ids.push(id);
        }
        state.merge_edge(ids[0], ids[1], &record.relation, dataset.as_str());
        Ok(true)
    }

    async fn upsert_node(&self, dataset: &Dataset, node: &NodeRecord) -> Result<(), GraphError> {
        self.check(&node.id)?;

        let mut state = self.state.lock().unwrap();
        let (id, _) = state.merge_node("id", &node.id, dataset.as_str());
        let props = state.nodes.get_mut(&id).expect("merged node exists");
        props.insert("name".to_string(), PropertyValue::from(node.name.as_str()));
        props.insert("type".to_string(), PropertyValue::from(node.node_type.as_str()));
        props.insert(
            "attributes".to_string(),
            PropertyValue::List(node.attributes.clone()),
        );
        Ok(())
    }

    async fn link_nodes(&self, dataset: &Dataset, edge: &EdgeRecord) -> Result<bool, GraphError> {
        self.check(&edge.source)?;

        let mut state = self.state.lock().unwrap();
        let (Some(start), Some(end)) = (
            state.find("id", &edge.source, dataset.as_str()),
            state.find("id", &edge.target, dataset.as_str()),
        ) else {
            return Ok(false);
        };
        let pos = state.merge_edge(start, end, &edge.relation, dataset.as_str());
        state.edges[pos].weight = Some(edge.weight);
        Ok(true)
    }
}

/// Write a JSON fixture into `dir` and return its path.
pub fn write_graph(dir: &tempfile::TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

pub fn dataset(name: &str) -> Dataset {
    Dataset::new(name).unwrap()
}
