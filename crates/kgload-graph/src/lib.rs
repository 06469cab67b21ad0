//! kgload-graph: Neo4j client for dataset-scoped graph loading.
//!
//! This crate is the single mutation point for the property graph.
//! Every write is parameterized and tagged with a dataset, so several
//! datasets can share one database and be cleared independently.

pub mod client;
pub mod mutations;
pub mod queries;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use store::GraphStore;
