use serde::{Deserialize, Serialize};

/// Hard cap on upload size (5 MB).
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Hard cap on data rows per file.
pub const MAX_ROWS: usize = 10_000;

/// File-level limits enforced before any row is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestLimits {
    pub max_file_bytes: u64,
    pub max_rows: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: MAX_FILE_BYTES,
            max_rows: MAX_ROWS,
        }
    }
}
