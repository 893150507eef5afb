//! CSV splitting into raw records.

mod header;
mod reader;

pub use header::{CsvHeaders, normalize_header};
pub use reader::{CsvTable, parse_csv_text};
