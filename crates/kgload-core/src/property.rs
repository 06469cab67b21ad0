//! Property values as they are written to the graph store.
//!
//! Extracted graphs carry free-form JSON property maps. The store only holds
//! scalars and homogeneous-ish lists, so every JSON value is narrowed to a
//! [`PropertyValue`] before it leaves the parser.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Property mapping with sorted keys, so serialization is deterministic.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// A single storable property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Narrow a JSON value to a storable property.
    ///
    /// `null` yields `None`. Objects have no native representation and are
    /// kept as their compact JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Boolean(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Self::Integer(i)),
                None => n.as_f64().map(Self::Float),
            },
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(items) => Some(Self::List(
                items.iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(_) => Some(Self::String(value.to_string())),
        }
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// Convert a JSON object into a property map, dropping `null` entries.
///
/// Anything other than an object yields an empty map.
pub fn property_map_from_json(value: &Value) -> PropertyMap {
    let Some(obj) = value.as_object() else {
        return PropertyMap::new();
    };
    obj.iter()
        .filter_map(|(k, v)| PropertyValue::from_json(v).map(|pv| (k.clone(), pv)))
        .collect()
}
