//! kgload-core: Shared data model for the kgload graph loader.
//!
//! This crate provides the types every other kgload crate speaks:
//! - Graph documents and their typed records (relationship lists, nodes, edges)
//! - Property values with a closed set of storable kinds
//! - Dataset scoping and load statistics
//! - Common error types

pub mod error;
pub mod property;
pub mod types;

pub use error::CoreError;
pub use property::{PropertyMap, PropertyValue};
pub use types::{
    Dataset, EdgeRecord, GraphDocument, GraphFormat, LoadStats, NodeDescriptor, NodeRecord,
    RelationshipRecord, StandardGraph,
};
