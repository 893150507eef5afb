//! CSV ingestion for CRM imports.
//!
//! Every check here is fatal for the file: nothing is parsed until the size,
//! type, name, encoding and content gates pass, and the header and row-count
//! checks run before any record reaches the pipeline.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use crm_ingest::{IngestLimits, read_import_file};
//!
//! let table = read_import_file(Path::new("contacts.csv"), &IngestLimits::default())?;
//! for record in table.records() {
//!     println!("{}: {:?}", record.row_number, record.get("Email"));
//! }
//! ```

mod csv;
mod decode;
mod error;
mod gates;
mod limits;
mod load;

// === Error Types ===
pub use error::{IngestError, Result};

// === Limits ===
pub use limits::{IngestLimits, MAX_FILE_BYTES, MAX_ROWS};

// === Gates ===
pub use gates::{check_content, check_file_name, check_file_size, check_file_type};

// === Reading ===
pub use csv::{CsvHeaders, CsvTable, normalize_header, parse_csv_text};
pub use decode::decode_text;
pub use load::{ingest_bytes, read_import_file};
