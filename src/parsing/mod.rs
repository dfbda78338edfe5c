//! Field cleaning for the heterogeneous upstream payloads.
//!
//! Calendar feeds encode numbers as display strings ("3.1%", "50K",
//! "1,234.5", "<0.1%") and timestamps in whatever format the provider
//! happened to pick. Everything here is lossy by design: a value that does
//! not clean up to a float becomes None and scores neutral downstream.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Placeholder strings the feeds use for "no value yet".
const NULL_MARKERS: &[&str] = &["-", "--", "n/a", "na", "null", "none", "tentative", "pending"];

/// Clean a string-encoded number into a float.
///
/// Strips percent signs, thousands separators, and stray leading characters
/// (currency marks, comparison prefixes), and scales K/M/B suffixes.
/// Idempotent: cleaning the rendering of an already-clean number yields the
/// same float.
pub fn clean_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NULL_MARKERS.contains(&trimmed.to_lowercase().as_str()) {
        return None;
    }

    let mut stripped: String = trimmed
        .chars()
        .filter(|c| *c != ',' && *c != '%')
        .collect();

    let mut multiplier = 1.0;
    if let Some(last) = stripped.chars().last() {
        match last.to_ascii_lowercase() {
            'k' => {
                multiplier = 1e3;
                stripped.pop();
            }
            'm' => {
                multiplier = 1e6;
                stripped.pop();
            }
            'b' => {
                multiplier = 1e9;
                stripped.pop();
            }
            _ => {}
        }
    }

    // Skip leading junk up to the first character that can start a number.
    let stripped = stripped.trim();
    let start = stripped
        .find(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')?;
    stripped[start..].parse::<f64>().ok().map(|v| v * multiplier)
}

/// Parse an upstream timestamp in any of the formats the feeds use.
///
/// Accepted: RFC 3339 with offset, `YYYY-MM-DD[ T]HH:MM:SS`, ICS
/// `YYYYMMDDTHHMMSS[Z]`, bare `YYYY-MM-DD` / `YYYYMMDD` / `MM-DD-YYYY`
/// dates (midnight UTC).
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y%m%dT%H%M%SZ", "%Y%m%dT%H%M%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for fmt in ["%Y-%m-%d", "%Y%m%d", "%m-%d-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

/// Parse a feed clock string like "2:00am" or "14:30". "All Day" and
/// "Tentative" rows carry no usable time.
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in ["%I:%M%p", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, fmt) {
            return Some(time);
        }
    }
    None
}

/// Combine a date string with an optional separate clock string, the way
/// the XML feed splits them.
pub fn parse_event_date_time(date_raw: &str, time_raw: Option<&str>) -> Option<DateTime<Utc>> {
    let date = parse_event_date(date_raw)?;
    match time_raw.and_then(parse_clock_time) {
        Some(time) => {
            let naive = date.date_naive().and_time(time);
            Some(Utc.from_utc_datetime(&naive))
        }
        None => Some(date),
    }
}
