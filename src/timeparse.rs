//! Timestamp parsing and formatting
//!
//! Readings carry wall-clock timestamps in `%Y-%m-%d %H:%M:%S` form. This
//! module parses the formats clients actually send (canonical, ISO 8601,
//! date-only, epoch, relative expressions like `now-7d`) and renders them
//! back into the canonical form used for storage and range filtering.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Canonical timestamp format for storage and display
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error for timestamps no supported format matches
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot parse timestamp: {0}")]
pub struct TimeParseError(pub String);

/// Current local time in canonical form
pub fn now_string() -> String {
    format_timestamp(Local::now().naive_local())
}

/// Render a timestamp in canonical form
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp string into a wall-clock time
///
/// Accepted forms, tried in order:
/// - canonical `%Y-%m-%d %H:%M:%S`
/// - epoch seconds or milliseconds
/// - `now` and relative expressions (`now-6h`, `now-7d`, `now-2w`, `now-1m`)
/// - RFC 3339 (converted to local wall-clock time)
/// - `%Y-%m-%dT%H:%M:%S` and `%Y-%m-%dT%H:%M`
/// - `%Y-%m-%d` (midnight)
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimeParseError> {
    let s = s.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Ok(dt);
    }

    // Raw epoch timestamps; large magnitudes are milliseconds
    if let Ok(ts) = s.parse::<i64>() {
        let secs = if ts.abs() >= 100_000_000_000 {
            ts / 1000
        } else {
            ts
        };
        return DateTime::from_timestamp(secs, 0)
            .map(|dt| dt.with_timezone(&Local).naive_local())
            .ok_or_else(|| TimeParseError(s.to_string()));
    }

    // Handle relative times like "now", "now-7d"
    if s.starts_with("now") {
        return parse_relative_time(s);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    Err(TimeParseError(s.to_string()))
}

/// Parse a timestamp and render it back in canonical form
pub fn canonicalize(s: &str) -> Result<String, TimeParseError> {
    parse_timestamp(s).map(format_timestamp)
}

/// Parse relative time like "now-7d"
fn parse_relative_time(s: &str) -> Result<NaiveDateTime, TimeParseError> {
    let now = Local::now().naive_local();

    if s == "now" {
        return Ok(now);
    }

    let re = regex::Regex::new(r"^now-(\d+)([hdwm])$")
        .map_err(|_| TimeParseError(s.to_string()))?;

    if let Some(caps) = re.captures(s) {
        let amount: i64 = caps[1]
            .parse()
            .map_err(|_| TimeParseError(s.to_string()))?;

        let delta = match &caps[2] {
            "h" => Duration::hours(amount),
            "d" => Duration::days(amount),
            "w" => Duration::weeks(amount),
            "m" => Duration::days(amount * 30),
            _ => return Err(TimeParseError(s.to_string())),
        };

        return Ok(now - delta);
    }

    Err(TimeParseError(s.to_string()))
}
