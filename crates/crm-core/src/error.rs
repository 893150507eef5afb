//! Pipeline-level error type.

use std::path::PathBuf;

use crm_ingest::IngestError;
use crm_map::MapError;
use crm_model::ModelError;
use thiserror::Error;

use crate::backend::BackendError;

/// Errors that end an import job.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file failed a gate or could not be parsed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Mapping(#[from] MapError),

    /// Every row was skipped.
    #[error("no valid records: all {rows} rows were skipped")]
    NoValidRecords { rows: usize },

    #[error("backend insert into {table} failed: {source}")]
    Backend {
        table: String,
        #[source]
        source: BackendError,
    },

    /// Illegal job stage transition.
    #[error(transparent)]
    Stage(#[from] ModelError),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ImportError {
    /// Short user-facing failure category.
    pub fn category(&self) -> &'static str {
        match self {
            ImportError::Ingest(err) => err.category(),
            ImportError::Mapping(_) => "invalid mapping overrides",
            ImportError::NoValidRecords { .. } => "no valid records",
            ImportError::Backend { .. } => "backend insert error",
            ImportError::Stage(_) => "internal error",
            ImportError::ConfigRead { .. } | ImportError::ConfigParse { .. } => {
                "invalid configuration"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
