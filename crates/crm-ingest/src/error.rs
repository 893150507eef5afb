//! Error types for CSV file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a file is rejected before any row is processed.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === File Gates ===
    #[error("file too large: {name} is {size} bytes (max {max_size})")]
    FileTooLarge {
        name: String,
        size: u64,
        max_size: u64,
    },

    #[error("wrong file type: {name} is not a .csv file")]
    UnsupportedFileType { name: String },

    #[error("unsafe file name: {name:?}")]
    UnsafeFileName { name: String },

    #[error("unsupported encoding: {name} is {encoding}")]
    UnsupportedEncoding {
        name: String,
        encoding: &'static str,
    },

    #[error("malicious content detected in {name}: found {pattern:?}")]
    MaliciousContent {
        name: String,
        pattern: &'static str,
    },

    // === CSV Structure Errors ===
    #[error("file is empty: {name}")]
    EmptyFile { name: String },

    #[error("malformed headers in {name}: {reason}")]
    MalformedHeaders { name: String, reason: String },

    #[error("too many rows in {name}: {rows} data rows (max {max_rows})")]
    TooManyRows {
        name: String,
        rows: usize,
        max_rows: usize,
    },

    #[error("failed to parse CSV {name}: {source}")]
    CsvParse {
        name: String,
        #[source]
        source: ::csv::Error,
    },
}

impl IngestError {
    /// Short user-facing failure category.
    pub fn category(&self) -> &'static str {
        match self {
            IngestError::FileNotFound { .. } | IngestError::FileRead { .. } => "unreadable file",
            IngestError::FileTooLarge { .. } => "file too large",
            IngestError::UnsupportedFileType { .. } => "wrong file type",
            IngestError::UnsafeFileName { .. } => "unsafe file name",
            IngestError::UnsupportedEncoding { .. } => "unsupported encoding",
            IngestError::MaliciousContent { .. } => "malicious content detected",
            IngestError::EmptyFile { .. } | IngestError::MalformedHeaders { .. } => {
                "malformed headers"
            }
            IngestError::TooManyRows { .. } => "too many rows",
            IngestError::CsvParse { .. } => "malformed CSV",
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileTooLarge {
            name: "big.csv".to_string(),
            size: 6 * 1024 * 1024,
            max_size: 5 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "file too large: big.csv is 6291456 bytes (max 5242880)"
        );
        assert_eq!(err.category(), "file too large");
    }

    #[test]
    fn test_malicious_display() {
        let err = IngestError::MaliciousContent {
            name: "x.csv".to_string(),
            pattern: "<script",
        };
        assert_eq!(
            err.to_string(),
            "malicious content detected in x.csv: found \"<script\""
        );
    }
}
