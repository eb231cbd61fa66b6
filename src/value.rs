//! Best-effort cell coercion.
//!
//! Coercion never fails: a cell that does not parse as the requested type is
//! simply missing, and the row filter in [`crate::clean`] decides what to do
//! about it. Rows and cells are otherwise left exactly as they were read.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

/// Tokens a spreadsheet export commonly uses for an absent value.
const MISSING_TOKENS: &[&str] = &["na", "n/a", "null", "none", "nan"];

/// True when the cell stands for an absent value: blank or a placeholder
/// token, case-insensitive.
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed.to_ascii_lowercase().as_str())
}

/// Parses a cell as a finite number. `inf` and `nan` literals count as
/// missing, not as values.
pub fn try_parse_number(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses a cell as a point in time. Datetime layouts are tried before
/// date-only layouts; a bare date resolves to midnight.
pub fn try_parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if is_missing(raw) {
        return None;
    }
    let trimmed = raw.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(parsed);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(parsed.and_time(NaiveTime::MIN));
        }
    }
    None
}
