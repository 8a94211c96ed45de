//! Timestamp normalization for provider order dates.
//!
//! The shipping provider reports order times as `"28 Jul 2025, 01:16 PM"`
//! with no zone; other order sources send ISO-8601 strings or epoch
//! milliseconds. Zone-less values are read in the reporting offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde_json::Value;

/// The provider's native format once its `", "` separator has been replaced
/// by a single space.
const PROVIDER_FORMATS: [&str; 2] = ["%d %b %Y %I:%M %p", "%d %b %Y %H:%M"];

/// Zone-less date-time layouts accepted by the generic fallback.
const NAIVE_DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d %b %Y %I:%M %p",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%b %d %Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M %p",
];

/// Date-only layouts read as local midnight.
const NAIVE_DATE_FORMATS: [&str; 4] = ["%d %b %Y", "%b %d %Y", "%b %d, %Y", "%m/%d/%Y"];

/// Parses an order timestamp.
///
/// The provider layout is tried first by splitting on `", "` and joining the
/// date and time halves with a space. When the split does not yield both
/// halves, or the joined string does not parse, the raw input goes through
/// the generic fallback (RFC 3339, RFC 2822, then common zone-less layouts).
///
/// Returns `None` when nothing matches; callers treat that as "exclude from
/// date-based aggregation".
#[must_use]
pub fn parse_flexible_date(input: &str, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    parse_provider_format(input, offset).or_else(|| parse_generic(input.trim(), offset))
}

/// Parses an order date that may be a string or epoch milliseconds.
#[must_use]
pub fn parse_date_value(value: &Value, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::String(s) => parse_flexible_date(s, offset),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.with_timezone(offset)),
        _ => None,
    }
}

/// Midnight at the start of `date` in `offset`.
#[must_use]
pub fn local_midnight(date: NaiveDate, offset: &FixedOffset) -> DateTime<FixedOffset> {
    localize(date.and_time(NaiveTime::MIN), offset)
}

/// Interprets a wall-clock time in `offset`.
#[must_use]
pub fn localize(naive: NaiveDateTime, offset: &FixedOffset) -> DateTime<FixedOffset> {
    let utc = naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, *offset)
}

fn parse_provider_format(input: &str, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    let mut parts = input.split(", ");
    let date_part = parts.next().filter(|p| !p.is_empty())?;
    let time_part = parts.next().filter(|p| !p.is_empty())?;
    let joined = format!("{date_part} {time_part}");

    PROVIDER_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&joined, fmt).ok())
        .map(|naive| localize(naive, offset))
}

fn parse_generic(input: &str, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(offset));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(offset));
    }

    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
    {
        return Some(localize(naive, offset));
    }

    // A bare ISO date names a UTC day, like `Date.parse("2024-01-01")`.
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(local_midnight(date, &FixedOffset::east_opt(0)?).with_timezone(offset));
    }

    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .map(|date| local_midnight(date, offset))
}
