//! CSV header normalization and sanity checks.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Characters a well-behaved header uses. Anything else is logged, not refused.
static ALLOWED_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N} _\-./()#&%?'’:+]+$").expect("Invalid header charset regex")
});

/// Header row of an import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Normalized column names in file order (may contain empties).
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// True when no header cell has content.
    pub fn is_blank(&self) -> bool {
        self.columns.iter().all(String::is_empty)
    }

    /// Log headers that are empty, duplicated or use unusual characters.
    pub fn audit(&self, file: &str) {
        let mut seen = BTreeSet::new();
        for (index, column) in self.columns.iter().enumerate() {
            if column.is_empty() {
                tracing::warn!(file, index, "empty header; column will be ignored");
                continue;
            }
            if !ALLOWED_HEADER.is_match(column) {
                tracing::warn!(file, header = %column, "header contains unexpected characters");
            }
            if !seen.insert(column.as_str()) {
                tracing::warn!(file, header = %column, "duplicate header");
            }
        }
    }
}

/// Trim whitespace and any stray byte-order mark.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_start_matches('\u{feff}').trim().to_string()
}
