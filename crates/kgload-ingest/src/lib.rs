//! kgload-ingest: Loads extracted knowledge graphs into Neo4j.
//!
//! Reads a graph JSON file, detects which of the two supported shapes it
//! uses, optionally clears the target dataset, and merges every record
//! into the graph store.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod loader;
pub mod parse;
pub mod relationship_list;
pub mod standard;

pub use error::{LoadError, Result};
pub use loader::{ingest, load, load_graph};
