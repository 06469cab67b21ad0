//! Ingestion of the relationship-list shape.
//!
//! Each record carries both endpoints inline:
//!
//! ```json
//! [{"start_node": {"label": "entity", "properties": {"name": "A", "schema_type": "person"}},
//!   "end_node": {"label": "entity", "properties": {"name": "B", "schema_type": "location"}},
//!   "relation": "located_in"}]
//! ```

use kgload_core::{Dataset, GraphFormat, LoadStats, RelationshipRecord};
use kgload_graph::GraphStore;

/// Merge every record, in order, into `dataset`.
///
/// Records missing a name on either endpoint are skipped. A failed write is
/// logged and skipped; it never aborts the load. The merge cannot tell a
/// created node from a matched one, so each merged record counts two nodes.
pub async fn ingest_relationship_list<S: GraphStore>(
    store: &S,
    dataset: &Dataset,
    records: &[RelationshipRecord],
) -> LoadStats {
    let mut stats = LoadStats::new(GraphFormat::RelationshipList);
    tracing::info!(%dataset, records = records.len(), "Loading relationship list");

    for (index, record) in records.iter().enumerate() {
        if !record.is_complete() {
            tracing::debug!(index, "Skipping relationship with unnamed endpoint");
            continue;
        }

        match store.merge_relationship(dataset, record).await {
            Ok(true) => {
                stats.nodes_created += 2;
                stats.relationships_created += 1;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(
                    start = %record.start.name,
                    end = %record.end.name,
                    relation = %record.relation,
                    error = %e,
                    "Error creating relationship"
                );
            }
        }
    }

    tracing::info!(
        %dataset,
        nodes = stats.nodes_created,
        relationships = stats.relationships_created,
        "Loaded relationship list"
    );
    stats
}
