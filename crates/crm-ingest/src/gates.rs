//! File-level checks run before the contents are parsed.

use std::path::Path;

use crm_normalization::find_dangerous_pattern;

use crate::error::{IngestError, Result};
use crate::limits::IngestLimits;

const FILE_NAME_PUNCTUATION: &[char] = &[' ', '.', '_', '-', '(', ')'];

/// Only letters, digits, space and `._-()`, and never `..`.
pub fn check_file_name(name: &str) -> Result<()> {
    let safe = !name.trim().is_empty()
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || FILE_NAME_PUNCTUATION.contains(&c));
    if safe {
        Ok(())
    } else {
        Err(IngestError::UnsafeFileName {
            name: name.to_string(),
        })
    }
}

/// The file must carry a `.csv` extension (any case).
pub fn check_file_type(name: &str) -> Result<()> {
    let is_csv = Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(IngestError::UnsupportedFileType {
            name: name.to_string(),
        })
    }
}

pub fn check_file_size(name: &str, size: u64, limits: &IngestLimits) -> Result<()> {
    if size > limits.max_file_bytes {
        return Err(IngestError::FileTooLarge {
            name: name.to_string(),
            size,
            max_size: limits.max_file_bytes,
        });
    }
    Ok(())
}

/// Reject the whole file when its decoded text contains a script-like pattern.
pub fn check_content(name: &str, text: &str) -> Result<()> {
    match find_dangerous_pattern(text) {
        Some(pattern) => {
            tracing::warn!(file = name, pattern, "rejecting file with dangerous content");
            Err(IngestError::MaliciousContent {
                name: name.to_string(),
                pattern,
            })
        }
        None => Ok(()),
    }
}
