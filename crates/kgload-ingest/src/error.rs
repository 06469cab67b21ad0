//! Error types for the kgload-ingest crate.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal load failures. Per-record write errors never surface here.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Graph file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown graph format in {}", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection error: {0}")]
    Connection(#[source] kgload_graph::GraphError),

    #[error("Failed to clear dataset {dataset}: {source}")]
    Clear {
        dataset: String,
        #[source]
        source: kgload_graph::GraphError,
    },

    #[error(transparent)]
    Core(#[from] kgload_core::CoreError),
}

pub type Result<T> = std::result::Result<T, LoadError>;
