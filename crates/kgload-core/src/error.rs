use thiserror::Error;

/// Errors raised while constructing kgload data-model values.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid dataset name: {0:?}")]
    InvalidDataset(String),
}
