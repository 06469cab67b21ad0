//! CLI entry point for the kgload graph loader.
//!
//! Prints the load statistics as JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use kgload_core::Dataset;
use kgload_graph::GraphClient;
use kgload_ingest::config::Settings;
use kgload_ingest::{load, load_graph, LoadError};

#[derive(Parser)]
#[command(name = "kgload")]
#[command(about = "Load an extracted knowledge graph JSON file into Neo4j")]
struct Cli {
    /// Graph JSON file (default: load.graph_path from config).
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Dataset to tag the graph with (default: load.dataset from config).
    #[arg(short, long)]
    dataset: Option<String>,

    /// Load additively instead of clearing the dataset first.
    #[arg(long)]
    no_clear: bool,

    /// Report stored node and relationship counts after loading.
    #[arg(long)]
    verify: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,

    /// Config file prefix (default: kgload).
    #[arg(short, long, default_value = "kgload")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    if let Err(e) = run(&cli).await {
        let error = format!("{e:#}");
        tracing::error!(%error, "Graph load failed");
        return Err(e);
    }
    Ok(())
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = Settings::load(&cli.config)?;
    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.load.graph_path));
    let dataset = cli.dataset.as_deref().unwrap_or(&settings.load.dataset);
    let clear_existing = settings.load.clear_existing && !cli.no_clear;

    if !path.exists() {
        anyhow::bail!(LoadError::NotFound { path });
    }

    tracing::info!(path = %path.display(), dataset, clear_existing, "Loading graph into Neo4j");

    let stats = if cli.verify {
        let dataset = Dataset::new(dataset)?;
        let graph = GraphClient::connect(&settings.neo4j)
            .await
            .map_err(LoadError::Connection)?;
        let stats = load(&graph, &path, &dataset, clear_existing).await?;
        report_counts(&graph, &dataset).await?;
        stats
    } else {
        load_graph(&path, dataset, &settings.neo4j, clear_existing).await?
    };

    println!("{}", serde_json::to_string(&stats)?);
    Ok(())
}

async fn report_counts(graph: &GraphClient, dataset: &Dataset) -> anyhow::Result<()> {
    let nodes = graph.count_nodes(dataset).await?;
    let relationships = graph.count_relationships(dataset).await?;
    tracing::info!(%dataset, nodes, relationships, "Stored graph");
    Ok(())
}
