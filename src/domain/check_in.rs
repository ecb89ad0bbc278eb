//! Daily check-in rule.
//!
//! The backend records one check-in per wallet per day. The bot decides
//! whether a new one is due by comparing the UTC day-of-month of the last
//! check-in with the UTC day-of-month of "now". Only the day-of-month is
//! compared: day 31 → day 1 counts as a new day, while the same
//! day-of-month in two different months does not.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Whether a check-in should be issued.
///
/// A missing or unparseable last check-in always triggers one.
pub fn needs_check_in(last_check_in: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_check_in {
        Some(last) => last.day() != now.day(),
        None => true,
    }
}

/// Parse the backend's `lastCheckIn` value.
///
/// Accepts RFC 3339 strings (`2025-01-31T08:00:00.000Z`), Unix
/// timestamps in milliseconds, and offset-less date-times or bare dates
/// (`2025-01-31T08:00:00.000`, `2025-01-31`), which are read as UTC.
pub fn parse_check_in_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}
