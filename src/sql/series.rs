//! Time series buckets for gap filling.
//!
//! [`time_series`] expands a date range into one range per granularity bucket.
//! The result feeds [`SqlDialect::generate_date_series`], whose rows are
//! left-joined against the aggregated data so empty buckets still appear.
//!
//! [`SqlDialect::generate_date_series`]: super::dialect::SqlDialect::generate_date_series

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::error::{DialectError, DialectResult};
use super::granularity::Granularity;
use crate::model::time::{format_timestamp, parse_date, parse_timestamp};

/// Upper bound on the number of buckets in one series.
pub const MAX_SERIES_LEN: usize = 50_000;

/// Inclusive bucket bounds in the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

impl TimeRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Bucket ranges covering `[from, to]`.
///
/// The first bucket starts at `from` truncated to the granularity. A bare
/// date as `to` covers that whole day.
pub fn time_series(
    granularity: Granularity,
    from: &str,
    to: &str,
) -> DialectResult<Vec<TimeRange>> {
    let start = parse_timestamp(from)
        .ok_or_else(|| DialectError::InvalidDateRange(format!("cannot parse '{}'", from)))?;
    let end = match parse_date(to) {
        Some(date) => end_of_day(date).ok_or_else(out_of_range)?,
        None => parse_timestamp(to)
            .ok_or_else(|| DialectError::InvalidDateRange(format!("cannot parse '{}'", to)))?,
    };
    if start > end {
        return Err(DialectError::InvalidDateRange(format!(
            "'{}' is after '{}'",
            from, to
        )));
    }

    let mut ranges = Vec::new();
    let mut bucket = truncate(granularity, start).ok_or_else(out_of_range)?;
    while bucket <= end {
        if ranges.len() == MAX_SERIES_LEN {
            return Err(DialectError::InvalidDateRange(format!(
                "series by {} exceeds {} buckets",
                granularity, MAX_SERIES_LEN
            )));
        }
        let next = advance(granularity, bucket).ok_or_else(out_of_range)?;
        let last = next - Duration::milliseconds(1);
        ranges.push(TimeRange::new(
            format_timestamp(&bucket),
            format_timestamp(&last),
        ));
        bucket = next;
    }

    Ok(ranges)
}

fn out_of_range() -> DialectError {
    DialectError::InvalidDateRange("date out of range".into())
}

fn end_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::days(1))?
        .checked_sub_signed(Duration::milliseconds(1))
}

fn truncate(granularity: Granularity, ts: NaiveDateTime) -> Option<NaiveDateTime> {
    let date = ts.date();
    match granularity {
        Granularity::Second => ts.with_nanosecond(0),
        Granularity::Minute => date.and_hms_opt(ts.hour(), ts.minute(), 0),
        Granularity::Hour => date.and_hms_opt(ts.hour(), 0, 0),
        Granularity::Day => Some(date.and_time(NaiveTime::MIN)),
        Granularity::Week => {
            let offset = Duration::days(i64::from(date.weekday().num_days_from_monday()));
            date.checked_sub_signed(offset)
                .map(|monday| monday.and_time(NaiveTime::MIN))
        }
        Granularity::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
            .map(|d| d.and_time(NaiveTime::MIN)),
        Granularity::Quarter => {
            let month = (date.month0() / 3) * 3 + 1;
            NaiveDate::from_ymd_opt(date.year(), month, 1).map(|d| d.and_time(NaiveTime::MIN))
        }
        Granularity::Year => {
            NaiveDate::from_ymd_opt(date.year(), 1, 1).map(|d| d.and_time(NaiveTime::MIN))
        }
    }
}

fn advance(granularity: Granularity, ts: NaiveDateTime) -> Option<NaiveDateTime> {
    match granularity {
        Granularity::Second => ts.checked_add_signed(Duration::seconds(1)),
        Granularity::Minute => ts.checked_add_signed(Duration::minutes(1)),
        Granularity::Hour => ts.checked_add_signed(Duration::hours(1)),
        Granularity::Day => ts.checked_add_signed(Duration::days(1)),
        Granularity::Week => ts.checked_add_signed(Duration::weeks(1)),
        Granularity::Month => ts.checked_add_months(Months::new(1)),
        Granularity::Quarter => ts.checked_add_months(Months::new(3)),
        Granularity::Year => ts.checked_add_months(Months::new(12)),
    }
}
