//! Graph file decoding and shape detection.

use std::path::Path;

use serde_json::Value;

use kgload_core::{EdgeRecord, GraphDocument, NodeRecord, RelationshipRecord, StandardGraph};

use crate::error::{LoadError, Result};

/// Read, decode and classify a graph file.
pub fn read_document(path: &Path) -> Result<GraphDocument> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| LoadError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    classify(value, path)
}

/// Decide which shape a decoded graph file has.
///
/// A top-level array is a relationship list; an object with a `nodes`
/// key is the standard shape. Anything else is rejected.
pub fn classify(value: Value, path: &Path) -> Result<GraphDocument> {
    match value {
        Value::Array(items) => Ok(GraphDocument::RelationshipList(
            items.iter().map(RelationshipRecord::from_json).collect(),
        )),
        Value::Object(ref obj) if obj.contains_key("nodes") => {
            let nodes = records(obj.get("nodes"), "nodes", NodeRecord::from_json);
            let edges = records(obj.get("edges"), "edges", EdgeRecord::from_json);
            Ok(GraphDocument::Standard(StandardGraph { nodes, edges }))
        }
        _ => Err(LoadError::UnknownFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn records<T>(value: Option<&Value>, key: &str, decode: fn(&Value) -> T) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items.iter().map(decode).collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            tracing::warn!(key, "Expected an array, treating as empty");
            Vec::new()
        }
    }
}
