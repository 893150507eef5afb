//! Enum whitelist matching.

use crm_model::EnumSpec;
use serde::{Deserialize, Serialize};

/// How source values are compared against an enum's members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumMatching {
    /// Case-insensitive; spaces and hyphens read as underscores.
    #[default]
    Lenient,
    /// Exact member names only.
    Strict,
}

/// Result of matching one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumMatch {
    /// Already a member, or became one after lenient normalization.
    Member(&'static str),
    /// Present but unrecognized; replaced by the default.
    Snapped(&'static str),
    /// Absent and the enum is required; filled with the default.
    Defaulted(&'static str),
    /// Absent and optional; stays null.
    Absent,
}

impl EnumMatch {
    /// The value to store, if any.
    pub fn value(&self) -> Option<&'static str> {
        match self {
            EnumMatch::Member(value) | EnumMatch::Snapped(value) | EnumMatch::Defaulted(value) => {
                Some(*value)
            }
            EnumMatch::Absent => None,
        }
    }
}

/// Lowercase, trim, and turn runs of spaces/hyphens into a single `_`.
pub fn enum_key(value: &str) -> String {
    let mut key = String::with_capacity(value.len());
    let mut pending_separator = false;
    for c in value.trim().chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
            continue;
        }
        if pending_separator && !key.is_empty() {
            key.push('_');
        }
        pending_separator = false;
        key.extend(c.to_lowercase());
    }
    key
}

/// Match `value` against `spec`. Blank input counts as absent.
pub fn match_enum(spec: &EnumSpec, value: Option<&str>, mode: EnumMatching) -> EnumMatch {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return if spec.required {
            EnumMatch::Defaulted(spec.default)
        } else {
            EnumMatch::Absent
        };
    };

    let candidate = match mode {
        EnumMatching::Lenient => enum_key(value),
        EnumMatching::Strict => value.to_string(),
    };
    match spec.values.iter().find(|member| **member == candidate) {
        Some(member) => EnumMatch::Member(*member),
        None => EnumMatch::Snapped(spec.default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGES: EnumSpec = EnumSpec {
        column: "stage",
        values: &["prospect", "closed_won"],
        default: "prospect",
        required: true,
    };

    #[test]
    fn test_enum_key() {
        assert_eq!(enum_key("Closed Won"), "closed_won");
        assert_eq!(enum_key("  closed -  won "), "closed_won");
        assert_eq!(enum_key("IN-PROGRESS"), "in_progress");
        assert_eq!(enum_key("won!!"), "won!!");
    }

    #[test]
    fn test_lenient_and_strict() {
        assert_eq!(
            match_enum(&STAGES, Some("Closed Won"), EnumMatching::Lenient),
            EnumMatch::Member("closed_won")
        );
        assert_eq!(
            match_enum(&STAGES, Some("Closed Won"), EnumMatching::Strict),
            EnumMatch::Snapped("prospect")
        );
        assert_eq!(
            match_enum(&STAGES, Some("closed_won"), EnumMatching::Strict),
            EnumMatch::Member("closed_won")
        );
    }

    #[test]
    fn test_unknown_and_missing() {
        assert_eq!(
            match_enum(&STAGES, Some("won!!"), EnumMatching::Lenient),
            EnumMatch::Snapped("prospect")
        );
        assert_eq!(
            match_enum(&STAGES, Some("  "), EnumMatching::Lenient),
            EnumMatch::Defaulted("prospect")
        );
        let optional = EnumSpec {
            required: false,
            ..STAGES
        };
        assert_eq!(
            match_enum(&optional, None, EnumMatching::Lenient),
            EnumMatch::Absent
        );
    }
}
