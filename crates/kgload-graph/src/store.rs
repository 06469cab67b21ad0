//! The write seam between the ingesters and the graph database.

use kgload_core::{Dataset, EdgeRecord, NodeRecord, RelationshipRecord};

use crate::client::GraphError;

/// Dataset-scoped graph writes needed to load a graph document.
///
/// Every operation is keyed by (identity key, dataset). Implementations
/// must never touch entities tagged with another dataset.
#[allow(async_fn_in_trait)]
pub trait GraphStore {
    /// Delete every node tagged with `dataset`, along with its relationships.
    /// Returns the number of deleted nodes.
    async fn clear_dataset(&self, dataset: &Dataset) -> Result<u64, GraphError>;

    /// Merge both endpoints by name and the relationship between them.
    ///
    /// A newly created endpoint gets its resolved type plus its raw
    /// properties; a matched endpoint has its raw properties re-applied.
    /// Returns `true` when the merge produced a result.
    async fn merge_relationship(
        &self,
        dataset: &Dataset,
        record: &RelationshipRecord,
    ) -> Result<bool, GraphError>;

    /// Upsert a node by id, overwriting `name`, `type` and `attributes`.
    async fn upsert_node(&self, dataset: &Dataset, node: &NodeRecord) -> Result<(), GraphError>;

    /// Merge a weighted relationship between two existing nodes.
    ///
    /// Returns `false` without writing when either endpoint is absent.
    async fn link_nodes(&self, dataset: &Dataset, edge: &EdgeRecord) -> Result<bool, GraphError>;
}
