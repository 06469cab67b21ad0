//! Core domain types for graph loading.
//!
//! A graph file arrives in one of two shapes. Both are decoded into typed
//! records here, with every field-level default applied, so the ingesters
//! only deal with skip rules and writes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::property::{property_map_from_json, PropertyMap, PropertyValue};

/// Relationship type used when a record carries none.
pub const DEFAULT_RELATION: &str = "RELATED_TO";

/// Node type used when a record carries none.
pub const DEFAULT_NODE_TYPE: &str = "Entity";

/// Default edge weight for the standard shape.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Property key that carries the dataset tag on every stored node and edge.
pub const DATASET_KEY: &str = "dataset";

// ── Dataset ───────────────────────────────────────────────────────

/// Logical namespace for a loaded graph.
///
/// Stored nodes are identified by (identity key, dataset), so several
/// datasets can share one database without colliding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Dataset(String);

impl Dataset {
    /// Dataset names are taken verbatim; blank names and names with
    /// surrounding whitespace are rejected.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() || name.trim() != name {
            return Err(CoreError::InvalidDataset(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Dataset {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Dataset> for String {
    fn from(d: Dataset) -> Self {
        d.0
    }
}

// ── Load Statistics ───────────────────────────────────────────────

/// Which of the two graph file shapes was detected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GraphFormat {
    RelationshipList,
    Standard,
}

impl GraphFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RelationshipList => "relationship_list",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a completed load.
///
/// For [`GraphFormat::RelationshipList`], `nodes_created` counts two nodes per
/// successfully merged record, whether or not those nodes already existed.
/// For [`GraphFormat::Standard`] it is one per successfully written node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadStats {
    pub nodes_created: u64,
    pub relationships_created: u64,
    pub format: GraphFormat,
}

impl LoadStats {
    pub fn new(format: GraphFormat) -> Self {
        Self {
            nodes_created: 0,
            relationships_created: 0,
            format,
        }
    }
}

// ── Relationship-List Shape ───────────────────────────────────────

/// One endpoint embedded in a relationship record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDescriptor {
    /// Identity key; empty when the record did not carry a usable name.
    pub name: String,
    pub label: Option<String>,
    pub schema_type: Option<String>,
    /// Raw properties, re-applied on every merge.
    pub properties: PropertyMap,
}

impl NodeDescriptor {
    /// Decode a `{"label": ..., "properties": {...}}` endpoint.
    pub fn from_json(value: &Value) -> Self {
        let raw_props = value.get("properties").unwrap_or(&Value::Null);
        let mut properties = property_map_from_json(raw_props);
        // The dataset tag is owned by the loader, never by the payload.
        properties.remove(DATASET_KEY);

        let name = raw_props.get("name").and_then(identity_string).unwrap_or_default();
        // Re-applied properties must not replace the merge key with a
        // differently typed value.
        if !name.is_empty() {
            properties.insert("name".to_string(), PropertyValue::String(name.clone()));
        }

        Self {
            name,
            label: value.get("label").and_then(non_empty_string),
            schema_type: raw_props.get("schema_type").and_then(non_empty_string),
            properties,
        }
    }

    /// `schema_type`, else the label, else the generic node type.
    pub fn resolved_type(&self) -> &str {
        self.schema_type
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or(DEFAULT_NODE_TYPE)
    }
}

/// A relationship with both endpoints inline.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipRecord {
    pub start: NodeDescriptor,
    pub end: NodeDescriptor,
    pub relation: String,
}

impl RelationshipRecord {
    /// Decode one element of a relationship list.
    ///
    /// Elements that are not objects decode to a record with empty names.
    pub fn from_json(value: &Value) -> Self {
        let null = Value::Null;
        Self {
            start: NodeDescriptor::from_json(value.get("start_node").unwrap_or(&null)),
            end: NodeDescriptor::from_json(value.get("end_node").unwrap_or(&null)),
            relation: value
                .get("relation")
                .and_then(non_empty_string)
                .unwrap_or_else(|| DEFAULT_RELATION.to_string()),
        }
    }

    /// Both endpoints carry a name.
    pub fn is_complete(&self) -> bool {
        !self.start.name.is_empty() && !self.end.name.is_empty()
    }
}

// ── Standard Shape ────────────────────────────────────────────────

/// A node of the `{nodes, edges}` shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    pub node_type: String,
    pub attributes: Vec<PropertyValue>,
}

impl NodeRecord {
    pub fn from_json(value: &Value) -> Self {
        let id = value.get("id").and_then(identity_string).unwrap_or_default();
        let name = value
            .get("name")
            .and_then(identity_string)
            .unwrap_or_else(|| id.clone());
        let node_type = value
            .get("type")
            .and_then(non_empty_string)
            .unwrap_or_else(|| DEFAULT_NODE_TYPE.to_string());
        let attributes = match value.get("attributes") {
            Some(Value::Array(items)) => items.iter().filter_map(PropertyValue::from_json).collect(),
            Some(other) => PropertyValue::from_json(other).into_iter().collect(),
            None => Vec::new(),
        };

        Self {
            id,
            name,
            node_type,
            attributes,
        }
    }
}

/// An edge of the `{nodes, edges}` shape, referencing node ids.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub relation: String,
    pub weight: f64,
}

impl EdgeRecord {
    pub fn from_json(value: &Value) -> Self {
        Self {
            source: value.get("source").and_then(identity_string).unwrap_or_default(),
            target: value.get("target").and_then(identity_string).unwrap_or_default(),
            relation: value
                .get("relation")
                .and_then(non_empty_string)
                .unwrap_or_else(|| DEFAULT_RELATION.to_string()),
            weight: value
                .get("weight")
                .and_then(Value::as_f64)
                .unwrap_or(DEFAULT_WEIGHT),
        }
    }

    /// Both endpoint ids are present.
    pub fn is_complete(&self) -> bool {
        !self.source.is_empty() && !self.target.is_empty()
    }
}

/// Nodes and edges of the standard shape, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardGraph {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

// ── Graph Document ────────────────────────────────────────────────

/// A decoded graph file: exactly one of the two supported shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphDocument {
    RelationshipList(Vec<RelationshipRecord>),
    Standard(StandardGraph),
}

impl GraphDocument {
    pub fn format(&self) -> GraphFormat {
        match self {
            Self::RelationshipList(_) => GraphFormat::RelationshipList,
            Self::Standard(_) => GraphFormat::Standard,
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────

/// Identity keys may arrive as strings or numbers; both map to a string.
fn identity_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    identity_string(value).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dataset_rejects_blank_names() {
        assert!(Dataset::new("").is_err());
        assert!(Dataset::new("   ").is_err());
        assert_eq!(Dataset::new("demo").unwrap().as_str(), "demo");
    }

    #[test]
    fn dataset_rejects_surrounding_whitespace() {
        assert!(Dataset::new(" demo").is_err());
        assert!(Dataset::new("demo\n").is_err());
        assert_eq!(Dataset::new("my demo").unwrap().as_str(), "my demo");
    }

    #[test]
    fn empty_relation_and_schema_type_use_defaults() {
        let rec = RelationshipRecord::from_json(&json!({
            "start_node": {"label": "entity", "properties": {"name": "A", "schema_type": ""}},
            "end_node": {"label": "", "properties": {"name": "B"}},
            "relation": ""
        }));
        assert_eq!(rec.relation, DEFAULT_RELATION);
        assert_eq!(rec.start.resolved_type(), "entity");
        assert_eq!(rec.end.resolved_type(), DEFAULT_NODE_TYPE);
    }

    #[test]
    fn numeric_name_property_matches_merge_key() {
        let rec = RelationshipRecord::from_json(&json!({
            "start_node": {"properties": {"name": 5}},
            "end_node": {"properties": {"name": "B"}}
        }));
        assert_eq!(rec.start.name, "5");
        assert_eq!(
            rec.start.properties.get("name"),
            Some(&PropertyValue::String("5".into()))
        );
    }

    #[test]
    fn load_stats_serializes_format_snake_case() {
        let stats = LoadStats {
            nodes_created: 2,
            relationships_created: 1,
            format: GraphFormat::RelationshipList,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            json!({"nodes_created": 2, "relationships_created": 1, "format": "relationship_list"})
        );
        assert_eq!(GraphFormat::Standard.to_string(), "standard");
    }

    #[test]
    fn relationship_record_applies_defaults() {
        let rec = RelationshipRecord::from_json(&json!({
            "start_node": {"label": "entity", "properties": {"name": "A", "schema_type": "person"}},
            "end_node": {"properties": {"name": "B"}}
        }));
        assert_eq!(rec.relation, DEFAULT_RELATION);
        assert_eq!(rec.start.resolved_type(), "person");
        assert_eq!(rec.end.resolved_type(), DEFAULT_NODE_TYPE);
        assert!(rec.is_complete());
        assert_eq!(
            rec.start.properties.get("schema_type"),
            Some(&PropertyValue::String("person".into()))
        );
    }

    #[test]
    fn relationship_record_falls_back_to_label() {
        let rec = RelationshipRecord::from_json(&json!({
            "start_node": {"label": "entity", "properties": {"name": "A"}},
            "end_node": {"label": "entity", "properties": {"name": "B"}},
            "relation": "near"
        }));
        assert_eq!(rec.start.resolved_type(), "entity");
        assert_eq!(rec.relation, "near");
    }

    #[test]
    fn relationship_record_strips_dataset_property() {
        let rec = RelationshipRecord::from_json(&json!({
            "start_node": {"properties": {"name": "A", "dataset": "other"}},
            "end_node": {"properties": {"name": "B"}}
        }));
        assert!(!rec.start.properties.contains_key(DATASET_KEY));
    }

    #[test]
    fn non_object_relationship_is_incomplete() {
        assert!(!RelationshipRecord::from_json(&json!("junk")).is_complete());
        assert!(!RelationshipRecord::from_json(&json!({
            "start_node": {"properties": {"name": ""}},
            "end_node": {"properties": {"name": "B"}}
        }))
        .is_complete());
    }

    #[test]
    fn node_record_defaults() {
        let node = NodeRecord::from_json(&json!({"id": "1"}));
        assert_eq!(node.name, "1");
        assert_eq!(node.node_type, DEFAULT_NODE_TYPE);
        assert!(node.attributes.is_empty());

        let numeric = NodeRecord::from_json(&json!({"id": 42, "attributes": ["a", 1]}));
        assert_eq!(numeric.id, "42");
        assert_eq!(numeric.attributes.len(), 2);
    }

    #[test]
    fn edge_record_defaults() {
        let edge = EdgeRecord::from_json(&json!({"source": "1", "target": "2"}));
        assert_eq!(edge.relation, DEFAULT_RELATION);
        assert_eq!(edge.weight, DEFAULT_WEIGHT);
        assert!(edge.is_complete());

        let weighted = EdgeRecord::from_json(&json!({"source": "1", "target": "2", "weight": 3}));
        assert_eq!(weighted.weight, 3.0);

        let missing = EdgeRecord::from_json(&json!({"source": "1"}));
        assert!(!missing.is_complete());
    }
}
