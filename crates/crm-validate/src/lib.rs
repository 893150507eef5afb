//! Record-level rules for CRM imports.
//!
//! Runs after coercion: enum whitelisting, numeric clamping and required-field
//! defaulting, followed by the keep/skip decision.

pub mod enums;
pub mod validator;

pub use enums::{EnumMatch, EnumMatching, enum_key, match_enum};
pub use validator::{Adjustment, RecordValidator, SkipReason, Validation};
