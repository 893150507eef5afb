use std::fmt;

use serde::Serialize;

/// A typed cell value on a clean record.
///
/// Dates and timestamps are kept in their normalized string form
/// (`YYYY-MM-DD` and `YYYY-MM-DDTHH:MM:SSZ`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(String),
    Timestamp(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Null, or text that is blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(value) | FieldValue::Date(value) | FieldValue::Timestamp(value) => {
                value.trim().is_empty()
            }
            FieldValue::Number(_) | FieldValue::Boolean(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) | FieldValue::Date(value) | FieldValue::Timestamp(value) => {
                Some(value)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Text(value) | FieldValue::Date(value) | FieldValue::Timestamp(value) => {
                f.write_str(value)
            }
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_json_values() {
        let values = vec![
            FieldValue::Null,
            FieldValue::text("Acme"),
            FieldValue::Number(12.5),
            FieldValue::Boolean(true),
            FieldValue::Date("2024-12-31".to_string()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,"Acme",12.5,true,"2024-12-31"]"#);
    }

    #[test]
    fn blank_detection() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::text("  ").is_blank());
        assert!(!FieldValue::Number(0.0).is_blank());
        assert!(!FieldValue::Boolean(false).is_blank());
    }
}
