//! Timestamp wire format.
//!
//! Time values cross the API as local datetime strings with millisecond
//! precision and no offset (`2021-02-01T00:00:00.000`). The SQL layer has
//! already converted them to the query timezone, so no zone is attached.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// chrono pattern of the time wire format (`YYYY-MM-DDTHH:mm:ss.SSS`).
///
/// Result coercion emits it and dialects parse it back in
/// `cast_timestamp_literal`, so a timestamp survives the round trip at
/// millisecond precision.
pub const TIME_WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Format a timestamp in the wire format.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIME_WIRE_FORMAT).to_string()
}

/// Parse a driver or client timestamp string.
///
/// Values carrying an offset are normalized to UTC; values without one are
/// taken as-is. A bare date means midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.naive_utc());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ts);
        }
    }
    parse_date(s).map(|date| date.and_time(NaiveTime::MIN))
}

/// Parse a bare `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Timestamp from unix epoch milliseconds.
pub fn from_epoch_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}
