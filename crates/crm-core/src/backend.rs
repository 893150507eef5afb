//! Destination backends for clean records.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crm_model::CleanRecord;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Failure reported by a backend for a whole batch.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend refused the batch.
    #[error("{message}")]
    Rejected { message: String },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Bulk insert API of the destination store.
///
/// A batch is atomic from the caller's side: any error means nothing counts as
/// imported.
pub trait Backend {
    fn insert(&mut self, table: &str, records: &[CleanRecord]) -> Result<(), BackendError>;
}

/// Keeps inserted batches in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    batches: Vec<(String, Vec<CleanRecord>)>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> &[(String, Vec<CleanRecord>)] {
        &self.batches
    }

    /// All records inserted into `table`, in insertion order.
    pub fn records(&self, table: &str) -> Vec<&CleanRecord> {
        self.batches
            .iter()
            .filter(|(name, _)| name == table)
            .flat_map(|(_, records)| records)
            .collect()
    }
}

impl Backend for MemoryBackend {
    fn insert(&mut self, table: &str, records: &[CleanRecord]) -> Result<(), BackendError> {
        self.batches.push((table.to_string(), records.to_vec()));
        Ok(())
    }
}

/// Appends records as JSON lines to `<dir>/<table>.jsonl`.
///
/// Each batch is staged in a temporary file next to the table file and
/// renamed over it, so a failed insert leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonLinesBackend {
    dir: PathBuf,
}

impl JsonLinesBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.jsonl"))
    }
}

impl Backend for JsonLinesBackend {
    fn insert(&mut self, table: &str, records: &[CleanRecord]) -> Result<(), BackendError> {
        let mut buffer = String::new();
        for record in records {
            buffer.push_str(&serde_json::to_string(record)?);
            buffer.push('\n');
        }

        let path = self.table_path(table);
        let io_error = |source| BackendError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_error)?;
        // Dropped (and removed) on any early return.
        let mut staged = NamedTempFile::new_in(&self.dir).map_err(io_error)?;
        match File::open(&path) {
            Ok(mut existing) => {
                io::copy(&mut existing, &mut staged).map_err(io_error)?;
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(io_error(err)),
        }
        staged.write_all(buffer.as_bytes()).map_err(io_error)?;
        staged.as_file().sync_all().map_err(io_error)?;
        staged.persist(&path).map_err(|err| io_error(err.error))?;

        tracing::info!(
            table,
            records = records.len(),
            path = %path.display(),
            "wrote batch"
        );
        Ok(())
    }
}

/// Refuses every batch with a fixed message.
#[derive(Debug, Clone)]
pub struct FailingBackend {
    message: String,
}

impl FailingBackend {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Backend for FailingBackend {
    fn insert(&mut self, _table: &str, _records: &[CleanRecord]) -> Result<(), BackendError> {
        Err(BackendError::Rejected {
            message: self.message.clone(),
        })
    }
}
