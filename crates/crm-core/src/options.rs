use std::path::Path;

use crm_ingest::{IngestLimits, MAX_FILE_BYTES, MAX_ROWS};
use crm_validate::EnumMatching;
use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

/// Rows between progress callbacks.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Knobs for one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    pub max_file_bytes: u64,
    pub max_rows: usize,
    pub enum_matching: EnumMatching,
    pub progress_interval: usize,
    /// Validate and report without calling the backend.
    pub dry_run: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: MAX_FILE_BYTES,
            max_rows: MAX_ROWS,
            enum_matching: EnumMatching::Lenient,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            dry_run: false,
        }
    }
}

impl ImportOptions {
    /// Load options from a JSON file; absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ImportError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ImportError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_enum_matching(mut self, matching: EnumMatching) -> Self {
        self.enum_matching = matching;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    pub fn ingest_limits(&self) -> IngestLimits {
        IngestLimits {
            max_file_bytes: self.max_file_bytes,
            max_rows: self.max_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let options: ImportOptions =
            serde_json::from_str(r#"{ "enum_matching": "strict", "max_rows": 50 }"#).unwrap();
        assert_eq!(options.enum_matching, EnumMatching::Strict);
        assert_eq!(options.max_rows, 50);
        assert_eq!(options.max_file_bytes, MAX_FILE_BYTES);
        assert_eq!(options.progress_interval, DEFAULT_PROGRESS_INTERVAL);
        assert!(!options.dry_run);
    }

    #[test]
    fn builders() {
        let options = ImportOptions::default()
            .with_dry_run(true)
            .with_progress_interval(10);
        assert!(options.dry_run);
        assert_eq!(options.ingest_limits().max_rows, MAX_ROWS);
    }
}
