//! Error types for mapping operations.

use std::path::PathBuf;

use crm_model::ModelError;
use thiserror::Error;

/// Errors from loading mapping overrides.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read mapping overrides {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping overrides: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Entity(#[from] ModelError),

    #[error("mapping override for {entity} has an empty header")]
    EmptyHeader { entity: String },
}

pub type Result<T> = std::result::Result<T, MapError>;
