//! Per-column-class coercion of raw cell text into typed values.

use crm_model::{ColumnClass, FieldValue, RejectionReason};

use crate::datetime::{parse_plain_date, parse_timestamp};
use crate::numeric::parse_number;
use crate::sanitize::sanitize_text;

/// Outcome of coercing one cell.
///
/// `rejection` is set only when a non-empty source value ended up null.
#[derive(Debug, Clone, PartialEq)]
pub struct Coercion {
    pub value: FieldValue,
    pub rejection: Option<RejectionReason>,
}

impl Coercion {
    pub fn value(value: FieldValue) -> Self {
        Self {
            value,
            rejection: None,
        }
    }

    pub fn empty() -> Self {
        Self::value(FieldValue::Null)
    }

    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            value: FieldValue::Null,
            rejection: Some(reason),
        }
    }

    fn from_parse<T>(
        parsed: Result<Option<T>, RejectionReason>,
        wrap: impl FnOnce(T) -> FieldValue,
    ) -> Self {
        match parsed {
            Ok(Some(value)) => Self::value(wrap(value)),
            Ok(None) => Self::empty(),
            Err(reason) => Self::rejected(reason),
        }
    }
}

/// Coerce a raw cell into the type its destination column expects.
pub fn coerce_value(raw: &str, class: ColumnClass) -> Coercion {
    match class {
        ColumnClass::Text => coerce_text(raw),
        ColumnClass::Raw => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Coercion::empty()
            } else {
                Coercion::value(FieldValue::text(trimmed))
            }
        }
        ColumnClass::Number => Coercion::from_parse(parse_number(raw), FieldValue::Number),
        ColumnClass::Timestamp => {
            Coercion::from_parse(parse_timestamp(raw), FieldValue::Timestamp)
        }
        ColumnClass::Date => Coercion::from_parse(parse_plain_date(raw), FieldValue::Date),
        ColumnClass::Boolean => Coercion::value(FieldValue::Boolean(parse_bool(raw))),
    }
}

/// `true`, `1` and `yes` (any case) are true; everything else is false.
pub fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

fn coerce_text(raw: &str) -> Coercion {
    if raw.trim().is_empty() {
        return Coercion::empty();
    }
    let cleaned = sanitize_text(raw);
    if cleaned.is_empty() {
        Coercion::rejected(RejectionReason::EmptyAfterSanitize)
    } else {
        Coercion::value(FieldValue::Text(cleaned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_model::HeuristicRule;

    #[test]
    fn text_is_sanitized() {
        let coerced = coerce_value("<b>Acme</b>", ColumnClass::Text);
        assert_eq!(coerced, Coercion::value(FieldValue::text("Acme")));
    }

    #[test]
    fn markup_only_text_is_rejected() {
        let coerced = coerce_value("<div></div>", ColumnClass::Text);
        assert_eq!(
            coerced,
            Coercion::rejected(RejectionReason::EmptyAfterSanitize)
        );
    }

    #[test]
    fn raw_keeps_markup_characters() {
        let coerced = coerce_value(" a<b>@x.io ", ColumnClass::Raw);
        assert_eq!(coerced.value, FieldValue::text("a<b>@x.io"));
    }

    #[test]
    fn typed_columns() {
        assert_eq!(
            coerce_value("1,000", ColumnClass::Number).value,
            FieldValue::Number(1000.0)
        );
        assert_eq!(
            coerce_value("2024-12-31", ColumnClass::Date).value,
            FieldValue::Date("2024-12-31".into())
        );
        assert_eq!(
            coerce_value("2024-12-31", ColumnClass::Number),
            Coercion::rejected(RejectionReason::Heuristic(HeuristicRule::DateLike))
        );
        assert_eq!(coerce_value("", ColumnClass::Timestamp), Coercion::empty());
    }

    #[test]
    fn booleans() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool(" yes "));
        assert!(parse_bool("1"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool(""));
        assert_eq!(
            coerce_value("", ColumnClass::Boolean).value,
            FieldValue::Boolean(false)
        );
    }
}
