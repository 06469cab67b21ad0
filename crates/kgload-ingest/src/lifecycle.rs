//! Dataset lifecycle: wiping a dataset before a fresh load.

use kgload_core::Dataset;
use kgload_graph::GraphStore;

use crate::error::{LoadError, Result};

/// Clear `dataset` when `clear_existing` is set.
///
/// A failed clear aborts the load; ingestion never runs against a dataset
/// whose clear failed. Clearing is not transactional with the load that
/// follows it.
pub async fn prepare_dataset<S: GraphStore>(
    store: &S,
    dataset: &Dataset,
    clear_existing: bool,
) -> Result<()> {
    if !clear_existing {
        tracing::debug!(%dataset, "Loading additively, dataset not cleared");
        return Ok(());
    }

    store
        .clear_dataset(dataset)
        .await
        .map_err(|source| LoadError::Clear {
            dataset: dataset.to_string(),
            source,
        })?;
    Ok(())
}
