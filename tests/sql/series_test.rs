use prism::sql::{time_series, DialectError, Granularity, TimeRange, MAX_SERIES_LEN};

#[test]
fn test_daily_series() {
    let ranges = time_series(Granularity::Day, "2021-01-01", "2021-01-03").unwrap();
    assert_eq!(
        ranges,
        vec![
            TimeRange::new("2021-01-01T00:00:00.000", "2021-01-01T23:59:59.999"),
            TimeRange::new("2021-01-02T00:00:00.000", "2021-01-02T23:59:59.999"),
            TimeRange::new("2021-01-03T00:00:00.000", "2021-01-03T23:59:59.999"),
        ]
    );
}

#[test]
fn test_monthly_series_aligns_to_month_start() {
    let ranges = time_series(Granularity::Month, "2021-01-15", "2021-03-10").unwrap();
    let from: Vec<_> = ranges.iter().map(|r| r.from.as_str()).collect();
    assert_eq!(
        from,
        vec![
            "2021-01-01T00:00:00.000",
            "2021-02-01T00:00:00.000",
            "2021-03-01T00:00:00.000",
        ]
    );
    assert_eq!(ranges[1].to, "2021-02-28T23:59:59.999");
}

#[test]
fn test_weekly_series_starts_monday() {
    // 2021-01-07 is a Thursday.
    let ranges = time_series(Granularity::Week, "2021-01-07", "2021-01-12").unwrap();
    assert_eq!(
        ranges,
        vec![
            TimeRange::new("2021-01-04T00:00:00.000", "2021-01-10T23:59:59.999"),
            TimeRange::new("2021-01-11T00:00:00.000", "2021-01-17T23:59:59.999"),
        ]
    );
}

#[test]
fn test_quarter_and_year() {
    let quarters = time_series(Granularity::Quarter, "2021-02-01", "2021-12-31").unwrap();
    assert_eq!(quarters.len(), 4);
    assert_eq!(quarters[3].from, "2021-10-01T00:00:00.000");
    assert_eq!(quarters[3].to, "2021-12-31T23:59:59.999");

    let years = time_series(Granularity::Year, "2020-06-01", "2021-06-01").unwrap();
    assert_eq!(years.len(), 2);
    assert_eq!(years[0].to, "2020-12-31T23:59:59.999");
}

#[test]
fn test_hourly_series_with_timestamps() {
    let ranges =
        time_series(Granularity::Hour, "2021-01-01T10:30:00.000", "2021-01-01T12:00:00.000")
            .unwrap();
    assert_eq!(ranges.len(), 3);
    assert_eq!(ranges[0].from, "2021-01-01T10:00:00.000");
    assert_eq!(ranges[2].to, "2021-01-01T12:59:59.999");
}

#[test]
fn test_invalid_ranges() {
    assert!(matches!(
        time_series(Granularity::Day, "2021-02-01", "2021-01-01"),
        Err(DialectError::InvalidDateRange(_))
    ));
    assert!(matches!(
        time_series(Granularity::Day, "2021-01-01", "next week"),
        Err(DialectError::InvalidDateRange(_))
    ));
}

#[test]
fn test_series_cap() {
    let err = time_series(Granularity::Minute, "2000-01-01", "2021-01-01").unwrap_err();
    assert!(matches!(err, DialectError::InvalidDateRange(_)));
    assert!(err.to_string().contains(&MAX_SERIES_LEN.to_string()));
}

#[test]
fn test_last_representable_day() {
    let err = time_series(Granularity::Day, "+262142-12-01", "+262142-12-31").unwrap_err();
    assert!(matches!(err, DialectError::InvalidDateRange(ref msg) if msg == "date out of range"));
}
