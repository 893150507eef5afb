//! Date and timestamp coercion with misalignment heuristics.
//!
//! Spreadsheet exports with a stray comma shift every following cell by one
//! column, so a description can land in a date column. The sniffing rules below
//! null such values instead of writing them, at the cost of the occasional false
//! positive (reported as [`RejectionReason::Heuristic`]).

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use crm_model::{HeuristicRule, RejectionReason};

use crate::sanitize::looks_like_markup;

/// Accepted year range for plain dates.
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Alphabetic runs longer than this are not month or weekday names.
const MAX_ALPHA_RUN: usize = 9;
const MAX_ALPHA_WORDS: usize = 2;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y", // US first: 01/15/2024
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%m-%d-%Y",
    "%B %d, %Y", // January 15, 2024
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse a timestamp cell into `YYYY-MM-DDTHH:MM:SSZ`.
pub fn parse_timestamp(raw: &str) -> Result<Option<String>, RejectionReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    reject_markup(trimmed)?;

    let parsed = parse_datetime_utc(trimmed)
        .or_else(|| parse_date_only(trimmed).and_then(|date| date.and_hms_opt(0, 0, 0)));
    match parsed {
        Some(datetime) => Ok(Some(datetime.format("%Y-%m-%dT%H:%M:%SZ").to_string())),
        None => Err(RejectionReason::Unparseable),
    }
}

/// Parse a plain date cell into `YYYY-MM-DD`.
pub fn parse_plain_date(raw: &str) -> Result<Option<String>, RejectionReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    reject_markup(trimmed)?;
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(RejectionReason::Heuristic(HeuristicRule::NumericToken));
    }
    if has_long_text(trimmed) {
        return Err(RejectionReason::Heuristic(HeuristicRule::LongText));
    }

    let date = parse_date_only(trimmed)
        .or_else(|| parse_datetime_utc(trimmed).map(|datetime| datetime.date()))
        .ok_or(RejectionReason::Unparseable)?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(RejectionReason::Heuristic(HeuristicRule::YearOutOfRange));
    }
    Ok(Some(date.format("%Y-%m-%d").to_string()))
}

fn reject_markup(value: &str) -> Result<(), RejectionReason> {
    if value.contains('@') {
        return Err(RejectionReason::Heuristic(HeuristicRule::EmailLike));
    }
    if looks_like_markup(value) {
        return Err(RejectionReason::Heuristic(HeuristicRule::Markup));
    }
    Ok(())
}

fn has_long_text(value: &str) -> bool {
    let words: Vec<&str> = value
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .collect();
    words.len() > MAX_ALPHA_WORDS
        || words
            .iter()
            .any(|word| word.chars().count() > MAX_ALPHA_RUN)
}

/// RFC 3339 (converted to UTC) or a naive datetime taken as UTC.
fn parse_datetime_utc(value: &str) -> Option<NaiveDateTime> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc).naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn parse_date_only(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heuristic(rule: HeuristicRule) -> Result<Option<String>, RejectionReason> {
        Err(RejectionReason::Heuristic(rule))
    }

    #[test]
    fn iso_and_us_dates() {
        assert_eq!(parse_plain_date("2024-12-31"), Ok(Some("2024-12-31".into())));
        assert_eq!(parse_plain_date("12/31/2024"), Ok(Some("2024-12-31".into())));
        assert_eq!(parse_plain_date("31/12/2024"), Ok(Some("2024-12-31".into())));
        assert_eq!(parse_plain_date("31.12.2024"), Ok(Some("2024-12-31".into())));
    }

    #[test]
    fn month_name_dates() {
        assert_eq!(
            parse_plain_date("December 31, 2024"),
            Ok(Some("2024-12-31".into()))
        );
        assert_eq!(parse_plain_date("5 Jan 2025"), Ok(Some("2025-01-05".into())));
    }

    #[test]
    fn timestamp_in_date_column_keeps_the_date() {
        assert_eq!(
            parse_plain_date("2024-03-01T09:15:00Z"),
            Ok(Some("2024-03-01".into()))
        );
    }

    #[test]
    fn misaligned_values_are_refused() {
        assert_eq!(
            parse_plain_date("WISDM Support Services"),
            heuristic(HeuristicRule::LongText)
        );
        assert_eq!(
            parse_plain_date("someone@example.com"),
            heuristic(HeuristicRule::EmailLike)
        );
        assert_eq!(
            parse_plain_date("margin: 0"),
            heuristic(HeuristicRule::Markup)
        );
        assert_eq!(parse_plain_date("20241231"), heuristic(HeuristicRule::NumericToken));
        assert_eq!(
            parse_plain_date("Professional"),
            heuristic(HeuristicRule::LongText)
        );
    }

    #[test]
    fn years_outside_range_are_refused() {
        assert_eq!(
            parse_plain_date("01/01/1850"),
            heuristic(HeuristicRule::YearOutOfRange)
        );
        assert_eq!(
            parse_plain_date("2250-06-01"),
            heuristic(HeuristicRule::YearOutOfRange)
        );
    }

    #[test]
    fn unparseable_date() {
        assert_eq!(parse_plain_date("next week"), Err(RejectionReason::Unparseable));
        assert_eq!(parse_plain_date(""), Ok(None));
    }

    #[test]
    fn timestamps_normalize_to_utc() {
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00+02:00"),
            Ok(Some("2024-01-15T08:30:00Z".into()))
        );
        assert_eq!(
            parse_timestamp("2024-01-15 10:30"),
            Ok(Some("2024-01-15T10:30:00Z".into()))
        );
        assert_eq!(
            parse_timestamp("01/15/2024 3:05 PM"),
            Ok(Some("2024-01-15T15:05:00Z".into()))
        );
        assert_eq!(
            parse_timestamp("2024-01-15"),
            Ok(Some("2024-01-15T00:00:00Z".into()))
        );
    }

    #[test]
    fn timestamps_refuse_markup() {
        assert_eq!(
            parse_timestamp("<td>2024-01-15</td>"),
            Err(RejectionReason::Heuristic(HeuristicRule::Markup))
        );
        assert_eq!(parse_timestamp("soon"), Err(RejectionReason::Unparseable));
    }
}
