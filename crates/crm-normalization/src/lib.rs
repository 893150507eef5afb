//! Cell-level cleaning for CRM imports.
//!
//! - **sanitize**: markup stripping and the dangerous-content gate
//! - **numeric**: money, count and percentage parsing
//! - **datetime**: date and timestamp parsing with misalignment heuristics
//! - **coerce**: dispatch by destination column class

pub mod coerce;
pub mod datetime;
pub mod numeric;
pub mod sanitize;

pub use coerce::{Coercion, coerce_value, parse_bool};
pub use datetime::{parse_plain_date, parse_timestamp};
pub use numeric::parse_number;
pub use sanitize::{
    DANGEROUS_PATTERNS, MARKUP_KEYWORDS, find_dangerous_pattern, looks_like_markup, sanitize_text,
};
