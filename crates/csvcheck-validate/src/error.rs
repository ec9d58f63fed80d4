use std::path::PathBuf;

use csvcheck_ingest::IngestError;
use thiserror::Error;

/// Errors that stop a validation run.
///
/// Per-file problems never surface here; they become failing outcomes.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ValidationError>;
