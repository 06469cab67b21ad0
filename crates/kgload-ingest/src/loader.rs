//! Top-level load orchestration.

use std::path::Path;

use kgload_core::{Dataset, GraphDocument, LoadStats};
use kgload_graph::{GraphClient, GraphConfig, GraphStore};

use crate::error::{LoadError, Result};
use crate::lifecycle::prepare_dataset;
use crate::parse::read_document;
use crate::relationship_list::ingest_relationship_list;
use crate::standard::ingest_standard;

/// Load the graph file at `path` into `dataset` through an open store.
///
/// Fails before any write if the file is missing, malformed, of unknown
/// shape, or if the requested clear fails.
pub async fn load<S: GraphStore>(
    store: &S,
    path: &Path,
    dataset: &Dataset,
    clear_existing: bool,
) -> Result<LoadStats> {
    let document = read_document(path)?;
    tracing::info!(path = %path.display(), format = %document.format(), "Detected graph format");
    ingest(store, &document, dataset, clear_existing).await
}

/// Optionally clear `dataset`, then dispatch to the matching ingester.
///
/// All writes run sequentially in input order against `store`.
pub async fn ingest<S: GraphStore>(
    store: &S,
    document: &GraphDocument,
    dataset: &Dataset,
    clear_existing: bool,
) -> Result<LoadStats> {
    prepare_dataset(store, dataset, clear_existing).await?;

    let stats = match document {
        GraphDocument::RelationshipList(records) => {
            ingest_relationship_list(store, dataset, records).await
        }
        GraphDocument::Standard(graph) => ingest_standard(store, dataset, graph).await,
    };
    Ok(stats)
}

/// Connect, load one graph file, and release the connection.
///
/// The file is validated before connecting, so a bad input never opens a
/// session. The client is dropped on every exit path.
pub async fn load_graph(
    path: &Path,
    dataset: &str,
    config: &GraphConfig,
    clear_existing: bool,
) -> Result<LoadStats> {
    let dataset = Dataset::new(dataset)?;
    let document = read_document(path)?;
    tracing::info!(path = %path.display(), format = %document.format(), "Detected graph format");

    let client = GraphClient::connect(config)
        .await
        .map_err(LoadError::Connection)?;
    ingest(&client, &document, &dataset, clear_existing).await
}
