//! Ingestion of the standard `{nodes, edges}` shape.

use kgload_core::{Dataset, GraphFormat, LoadStats, StandardGraph};
use kgload_graph::GraphStore;

/// Write all nodes, then all edges, into `dataset`.
///
/// Edges may reference any node in the document, so every node is written
/// before the first edge. An edge whose endpoints are not both stored is a
/// no-op and is not counted.
pub async fn ingest_standard<S: GraphStore>(
    store: &S,
    dataset: &Dataset,
    graph: &StandardGraph,
) -> LoadStats {
    let mut stats = LoadStats::new(GraphFormat::Standard);
    tracing::info!(
        %dataset,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Loading standard graph"
    );

    for node in &graph.nodes {
        if node.id.is_empty() {
            tracing::debug!("Skipping node without id");
            continue;
        }

        match store.upsert_node(dataset, node).await {
            Ok(()) => stats.nodes_created += 1,
            Err(e) => tracing::warn!(id = %node.id, error = %e, "Error creating node"),
        }
    }

    for edge in &graph.edges {
        if !edge.is_complete() {
            tracing::debug!("Skipping edge without source or target");
            continue;
        }

        match store.link_nodes(dataset, edge).await {
            Ok(true) => stats.relationships_created += 1,
            Ok(false) => {
                tracing::debug!(
                    source = %edge.source,
                    target = %edge.target,
                    "Skipping edge with missing endpoint"
                );
            }
            Err(e) => tracing::warn!(
                source = %edge.source,
                target = %edge.target,
                error = %e,
                "Error creating relationship"
            ),
        }
    }

    tracing::info!(
        %dataset,
        nodes = stats.nodes_created,
        relationships = stats.relationships_created,
        "Loaded standard graph"
    );
    stats
}
