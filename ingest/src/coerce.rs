//! FILENAME: ingest/src/coerce.rs
//! PURPOSE: Lossy-but-safe value coercion for raw CSV cells.
//! CONTEXT: Malformed values are recovered locally — a bad number becomes 0,
//! a bad date becomes None — so one garbage cell never sinks a whole load.

use chrono::NaiveDate;
use engine::clamp_hours;

/// Date formats accepted for end/change dates, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parses a cell as a plain number. Thousands separators are tolerated;
/// empty or unparsable cells are None.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let clean = raw.trim().replace(',', "");
    if clean.is_empty() {
        return None;
    }
    clean.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses an hours cell: unparsable input reads as 0 and negatives are
/// clamped, so the allocation matrix stays non-negative.
pub fn coerce_hours(raw: &str) -> f64 {
    clamp_hours(coerce_number(raw).unwrap_or(0.0))
}

/// Parses a currency-formatted cell ("$12,500" style), defaulting to 0.
pub fn coerce_currency(raw: &str) -> f64 {
    let clean = raw.trim().replace(['$', ','], "");
    if clean.is_empty() {
        return 0.0;
    }
    clean.parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Permissive date parsing: tries the known formats, then the date part of a
/// datetime string. Unparsable dates are None, never an error.
pub fn coerce_date(raw: &str) -> Option<NaiveDate> {
    let clean = raw.trim();
    if clean.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(clean, format) {
            return Some(date);
        }
    }
    // "2026-08-05T00:00:00" / "2026-08-05 00:00:00" style: retry the prefix.
    if let Some(prefix) = clean.split(['T', ' ']).next() {
        if prefix.len() < clean.len() {
            for format in DATE_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(prefix, format) {
                    return Some(date);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_tolerate_separators_and_whitespace() {
        assert_eq!(coerce_number(" 1,250.5 "), Some(1250.5));
        assert_eq!(coerce_number("40"), Some(40.0));
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("n/a"), None);
    }

    #[test]
    fn hours_default_to_zero_and_clamp() {
        assert_eq!(coerce_hours("garbage"), 0.0);
        assert_eq!(coerce_hours(""), 0.0);
        assert_eq!(coerce_hours("-5"), 0.0);
        assert_eq!(coerce_hours("12.5"), 12.5);
    }

    #[test]
    fn currency_strips_symbols() {
        assert_eq!(coerce_currency("$12,500"), 12500.0);
        assert_eq!(coerce_currency("  $1,000.50"), 1000.5);
        assert_eq!(coerce_currency("8000"), 8000.0);
        assert_eq!(coerce_currency("TBD"), 0.0);
        assert_eq!(coerce_currency(""), 0.0);
    }

    #[test]
    fn dates_parse_across_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(coerce_date("2026-08-05"), Some(expected));
        assert_eq!(coerce_date("08/05/2026"), Some(expected));
        assert_eq!(coerce_date("08/05/26"), Some(expected));
        assert_eq!(coerce_date("Aug 5, 2026"), Some(expected));
        assert_eq!(coerce_date("2026-08-05T10:30:00"), Some(expected));
    }

    #[test]
    fn bad_dates_are_none() {
        assert_eq!(coerce_date(""), None);
        assert_eq!(coerce_date("soon"), None);
        assert_eq!(coerce_date("13/45/2026"), None);
    }
}
