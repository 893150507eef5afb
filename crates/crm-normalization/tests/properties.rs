//! Property tests for cell coercion.

use crm_model::{ColumnClass, FieldValue};
use crm_normalization::{MARKUP_KEYWORDS, coerce_value, parse_plain_date, sanitize_text};
use proptest::prelude::*;

proptest! {
    #[test]
    fn sanitize_is_idempotent(input in ".{0,80}") {
        let once = sanitize_text(&input);
        prop_assert_eq!(sanitize_text(&once), once.clone());
    }

    #[test]
    fn sanitized_text_has_no_tags(input in "[a-z <>/=\"]{0,60}") {
        let cleaned = sanitize_text(&input);
        if let Some(open) = cleaned.find('<') {
            prop_assert!(!cleaned[open..].contains('>'));
        }
        prop_assert!(!cleaned.starts_with(' ') && !cleaned.ends_with(' '));
        prop_assert!(!cleaned.contains("  "));
    }

    #[test]
    fn numbers_stay_finite(input in "\\PC{0,24}") {
        if let FieldValue::Number(value) = coerce_value(&input, ColumnClass::Number).value {
            prop_assert!(value.is_finite());
        }
    }

    #[test]
    fn valid_dates_round_trip(year in 1900i32..=2100, month in 1u32..=12, day in 1u32..=28) {
        let iso = format!("{year:04}-{month:02}-{day:02}");
        prop_assert_eq!(parse_plain_date(&iso), Ok(Some(iso.clone())));
        let us = format!("{month:02}/{day:02}/{year}");
        prop_assert_eq!(parse_plain_date(&us), Ok(Some(iso)));
    }

    #[test]
    fn parsed_dates_are_in_range(input in "[0-9/\\-. ]{0,12}") {
        if let Ok(Some(date)) = parse_plain_date(&input) {
            let year: i32 = date[..4].parse().unwrap();
            prop_assert!((1900..=2100).contains(&year));
        }
    }

    #[test]
    fn email_or_markup_never_becomes_a_date(
        before in "[0-9/\\- ]{0,10}",
        after in "[0-9/\\- ]{0,10}",
        marker in prop::sample::select(vec!["@", "style=", "margin:", "padding", "font-size", "<td>", "{"]),
    ) {
        let raw = format!("{before}{marker}{after}");
        prop_assert!(parse_plain_date(&raw).is_err());
        prop_assert_eq!(coerce_value(&raw, ColumnClass::Date).value, FieldValue::Null);
        prop_assert_eq!(coerce_value(&raw, ColumnClass::Timestamp).value, FieldValue::Null);
    }
}

#[test]
fn markup_keywords_include_css_properties() {
    assert!(MARKUP_KEYWORDS.contains(&"margin"));
    assert!(MARKUP_KEYWORDS.contains(&"style="));
}
