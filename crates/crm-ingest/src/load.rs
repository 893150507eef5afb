//! Entry points: gates, decoding and parsing in one call.

use std::path::Path;

use crate::csv::{CsvTable, parse_csv_text};
use crate::decode::decode_text;
use crate::error::{IngestError, Result};
use crate::gates::{check_content, check_file_name, check_file_size, check_file_type};
use crate::limits::IngestLimits;

/// Read and parse an import file from disk.
///
/// The size gate runs on file metadata, so an oversized file is refused
/// without being read.
pub fn read_import_file(path: &Path, limits: &IngestLimits) -> Result<CsvTable> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    check_file_size(&name, metadata.len(), limits)?;
    check_file_type(&name)?;
    check_file_name(&name)?;

    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    ingest_bytes(&name, &bytes, limits)
}

/// Gate, decode and parse an in-memory upload.
pub fn ingest_bytes(name: &str, bytes: &[u8], limits: &IngestLimits) -> Result<CsvTable> {
    check_file_size(name, bytes.len() as u64, limits)?;
    check_file_type(name)?;
    check_file_name(name)?;

    let text = decode_text(name, bytes)?;
    check_content(name, &text)?;
    parse_csv_text(name, &text, limits.max_rows)
}

fn io_error(path: &Path, source: std::io::Error) -> IngestError {
    if source.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }
}
