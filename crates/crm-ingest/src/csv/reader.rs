//! CSV text parsing with the `csv` crate.

use crm_model::RawRecord;

use crate::error::{IngestError, Result};

use super::header::{CsvHeaders, normalize_header};

/// Parsed import file: headers plus one raw record per non-blank data line.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub file_name: String,
    pub headers: CsvHeaders,
    pub records: Vec<RawRecord>,
}

impl CsvTable {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> impl Iterator<Item = &RawRecord> {
        self.records.iter()
    }
}

/// Split decoded CSV text into headers and raw records.
///
/// The first line holds the headers. Blank lines are skipped; short rows are
/// padded with empty cells and long rows are truncated to the header width.
/// Row numbers are 1-based and count data lines after the header.
pub fn parse_csv_text(name: &str, text: &str, max_rows: usize) -> Result<CsvTable> {
    if text.trim().is_empty() {
        return Err(IngestError::EmptyFile {
            name: name.to_string(),
        });
    }

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = reader.records();

    let header_record = rows
        .next()
        .ok_or_else(|| IngestError::MalformedHeaders {
            name: name.to_string(),
            reason: "no header row".to_string(),
        })?
        .map_err(|source| csv_error(name, source))?;
    let headers = CsvHeaders::new(header_record.iter().map(normalize_header).collect());
    if headers.is_blank() {
        return Err(IngestError::MalformedHeaders {
            name: name.to_string(),
            reason: "header row is empty".to_string(),
        });
    }
    headers.audit(name);

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let row = row.map_err(|source| csv_error(name, source))?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row_number = index + 1;
        if row.len() != headers.len() {
            tracing::debug!(
                file = name,
                row = row_number,
                cells = row.len(),
                columns = headers.len(),
                "row width differs from header width"
            );
        }
        let cells = headers
            .columns
            .iter()
            .enumerate()
            .map(|(column, header)| {
                let value = row.get(column).unwrap_or_default();
                (header.clone(), value.to_string())
            })
            .collect();
        records.push(RawRecord::new(row_number, cells));
    }

    if records.len() > max_rows {
        return Err(IngestError::TooManyRows {
            name: name.to_string(),
            rows: records.len(),
            max_rows,
        });
    }

    tracing::info!(
        file = name,
        rows = records.len(),
        columns = headers.len(),
        "parsed CSV"
    );
    Ok(CsvTable {
        file_name: name.to_string(),
        headers,
        records,
    })
}

fn csv_error(name: &str, source: ::csv::Error) -> IngestError {
    IngestError::CsvParse {
        name: name.to_string(),
        source,
    }
}
