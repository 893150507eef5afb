//! Header-to-column mapping for CRM imports.
//!
//! Mapping is an exact lookup; there is no fuzzy matching. Unknown headers are
//! reported as unmapped and their cells dropped.

pub mod error;
pub mod mapper;
pub mod overrides;
pub mod tables;

pub use error::{MapError, Result};
pub use mapper::{ColumnAssignment, Destination, FieldMapper, HeaderMapping};
pub use overrides::{IGNORE_MARKER, MappingOverrides};
pub use tables::{HeaderRule, StaticTarget, common_ignored, header_rules};
