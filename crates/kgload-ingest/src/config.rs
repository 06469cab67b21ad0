//! Configuration for the kgload loader.

use serde::Deserialize;

use kgload_graph::GraphConfig;

/// Top-level settings.
///
/// Loaded from `kgload.toml` or `KGLOAD__` environment variables
/// (e.g. `KGLOAD__NEO4J__URI`, `KGLOAD__LOAD__DATASET`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub neo4j: GraphConfig,

    #[serde(default)]
    pub load: LoadConfig,
}

/// What to load and where.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadConfig {
    /// Path to the graph JSON file.
    #[serde(default = "default_graph_path")]
    pub graph_path: String,

    /// Dataset every node and relationship is tagged with.
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Wipe the dataset before loading.
    #[serde(default = "default_true")]
    pub clear_existing: bool,
}

fn default_graph_path() -> String {
    "output/graphs/demo_new.json".to_string()
}

fn default_dataset() -> String {
    "demo".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            graph_path: default_graph_path(),
            dataset: default_dataset(),
            clear_existing: default_true(),
        }
    }
}

impl Settings {
    /// Layer the optional config file `<file_prefix>.toml` under
    /// `KGLOAD__` environment variables.
    pub fn load(file_prefix: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("KGLOAD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
