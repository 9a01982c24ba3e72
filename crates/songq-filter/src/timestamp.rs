//! Timestamp parsing and formatting for `modified-since` and `added-since`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, ParseError, SecondsFormat, Utc};

use crate::error::ErrorKind;

/// Date-time layouts without an offset; these are taken to be UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO 8601 time stamp.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00Z`, `2024-05-01T14:00:00+02:00`), a date and time
/// without offset (UTC), or a bare date (UTC midnight). On failure, the RFC 3339 error is
/// returned since it is the most descriptive.
pub fn parse_iso8601(text: &str) -> Result<DateTime<Utc>, ParseError> {
    let rfc3339_error = match DateTime::parse_from_rfc3339(text) {
        Ok(time) => return Ok(time.with_timezone(&Utc)),
        Err(err) => err,
    };

    for format in NAIVE_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(time.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
        .ok_or(rfc3339_error)
}

/// Parses a time stamp as ISO 8601, falling back to integral Unix seconds.
///
/// If neither form applies, the ISO 8601 error is reported.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, ErrorKind> {
    parse_iso8601(text).or_else(|source| {
        parse_unix_seconds(text).ok_or_else(|| ErrorKind::InvalidTimestamp {
            value: text.to_string(),
            source,
        })
    })
}

/// Parses a non-empty, all-digit Unix time in seconds.
fn parse_unix_seconds(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let seconds: i64 = text.parse().ok()?;
    DateTime::from_timestamp(seconds, 0)
}

/// Formats a time stamp so that [`parse_timestamp`] reads it back unchanged.
///
/// RFC 3339 has no room for years past 9999, so those are written as Unix seconds.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    if time.year() > 9999 {
        return time.timestamp().to_string();
    }
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
