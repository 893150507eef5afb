//! Numeric coercion for money, counts and percentages.

use crm_model::{HeuristicRule, RejectionReason};

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£'];

/// Parse a number cell.
///
/// `Ok(None)` for blank input. Currency symbols, thousands separators and a
/// trailing `%` are stripped first. Values carrying date/time separators (`/`,
/// `:`, or a `-` anywhere but the leading sign) are refused so a misplaced date
/// column never turns into a number.
pub fn parse_number(raw: &str) -> Result<Option<f64>, RejectionReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if looks_date_like(trimmed) {
        return Err(RejectionReason::Heuristic(HeuristicRule::DateLike));
    }

    let cleaned = strip_decorations(trimmed);
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(RejectionReason::Unparseable),
    }
}

/// Whether the value contains separators typical of dates and times.
pub fn looks_date_like(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    unsigned.contains('/') || unsigned.contains(':') || unsigned.contains('-')
}

fn strip_decorations(value: &str) -> String {
    let value = value.strip_suffix('%').unwrap_or(value);
    value
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect()
}
