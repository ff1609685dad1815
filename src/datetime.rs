//! Date/time utilities for Distributed.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Format used by cookie `expires` attributes (same as `Date.toUTCString`).
pub const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

const YEAR_SECS: f64 = 31_536_000.0;
const MONTH_SECS: f64 = 2_592_000.0;
const DAY_SECS: f64 = 86_400.0;
const HOUR_SECS: f64 = 3_600.0;
const MINUTE_SECS: f64 = 60.0;

/// Parse a timestamp as sent by the backend.
///
/// Accepts RFC3339 (with or without fractional seconds) and the
/// `YYYY-MM-DD HH:MM:SS` form, which is assumed to be UTC.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Describe how long ago `timestamp` was, relative to now.
///
/// Returns e.g. `"3 hours"`; callers append `" ago"`.
pub fn time_since(timestamp: &str) -> String {
    time_since_at(timestamp, Utc::now())
}

/// Describe how long ago `timestamp` was, relative to `now`.
///
/// A unit is chosen once the interval exceeds one whole unit; anything
/// shorter than a minute is reported in seconds. Unparseable timestamps
/// yield `"0 seconds"`.
pub fn time_since_at(timestamp: &str, now: DateTime<Utc>) -> String {
    let seconds = match parse_timestamp(timestamp) {
        Some(then) => (now - then).num_milliseconds() as f64 / 1000.0,
        None => 0.0,
    };
    let seconds = seconds.floor();

    let units = [
        (YEAR_SECS, "years"),
        (MONTH_SECS, "months"),
        (DAY_SECS, "days"),
        (HOUR_SECS, "hours"),
        (MINUTE_SECS, "minutes"),
    ];
    for (unit_secs, label) in units {
        let interval = seconds / unit_secs;
        if interval > 1.0 {
            return format!("{} {}", interval.floor() as i64, label);
        }
    }
    format!("{} seconds", seconds as i64)
}

/// Convert epoch seconds to a UTC datetime, clamping out-of-range values to the epoch.
pub fn from_epoch_secs(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Format epoch seconds as a cookie expiry date.
pub fn cookie_expiry(secs: i64) -> String {
    from_epoch_secs(secs).format(COOKIE_DATE_FORMAT).to_string()
}

/// Parse a cookie expiry date back into a UTC datetime.
pub fn parse_cookie_expiry(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), COOKIE_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
