//! Shared helper functions for SQL dialect implementations.
//!
//! This module provides reusable building blocks that dialects can compose
//! to implement the `SqlDialect` trait with minimal duplication.

use regex::Regex;
use std::sync::LazyLock;

use super::super::error::{DialectError, DialectResult};
use super::super::filter::MatchKind;
use super::super::granularity::Granularity;
use super::super::series::TimeRange;

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: Vertica, Postgres
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
/// Used by: All dialects
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

// =============================================================================
// Time
// =============================================================================

/// `DATE_TRUNC('<unit>', expr)` with the given function spelling.
/// Used by: Vertica (`DATE_TRUNC`), Postgres (`date_trunc`)
pub fn date_trunc(function: &str, granularity: Granularity, date_expr: &str) -> String {
    format!("{}('{}', {})", function, granularity.as_str(), date_expr)
}

static TIMEZONE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9_+\-]*(?:/[A-Za-z0-9_+\-]+)*|[+\-]\d{2}(?::?\d{2})?)$")
        .unwrap()
});

/// Check that a timezone is a plain IANA name (`America/New_York`, `UTC`,
/// `Etc/GMT+5`) or a numeric offset (`+05:30`) before it is spliced into SQL.
pub fn validate_timezone(timezone: &str) -> DialectResult<&str> {
    if TIMEZONE_NAME.is_match(timezone) {
        Ok(timezone)
    } else {
        Err(DialectError::InvalidTimezone(timezone.to_string()))
    }
}

/// `SELECT 'from' f, 'to' t UNION ALL ...` rows of a date series.
pub fn union_all_ranges(ranges: &[TimeRange]) -> DialectResult<String> {
    if ranges.is_empty() {
        return Err(DialectError::EmptyDateSeries);
    }
    Ok(ranges
        .iter()
        .map(|range| {
            format!(
                "SELECT {} f, {} t",
                quote_string_single(&range.from),
                quote_string_single(&range.to)
            )
        })
        .collect::<Vec<_>>()
        .join(" UNION ALL "))
}

/// `('from', 'to'), ...` rows of a date series.
pub fn values_ranges(ranges: &[TimeRange]) -> DialectResult<String> {
    if ranges.is_empty() {
        return Err(DialectError::EmptyDateSeries);
    }
    Ok(ranges
        .iter()
        .map(|range| {
            format!(
                "({}, {})",
                quote_string_single(&range.from),
                quote_string_single(&range.to)
            )
        })
        .collect::<Vec<_>>()
        .join(", "))
}

// =============================================================================
// Predicates
// =============================================================================

/// `CASE WHEN <predicate> THEN 1 ELSE 0 END`
/// Used by: Vertica, Postgres
pub fn case_indicator(predicate: &str) -> String {
    format!("CASE WHEN {} THEN 1 ELSE 0 END", predicate)
}

/// Leading and trailing wildcard for a match kind.
pub fn like_wildcards(kind: MatchKind) -> (&'static str, &'static str) {
    match kind {
        MatchKind::Contains => ("%", "%"),
        MatchKind::StartsWith => ("", "%"),
        MatchKind::EndsWith => ("%", ""),
        MatchKind::Equals => ("", ""),
    }
}

/// `col [NOT] ILIKE <pattern>`
pub fn ilike(column: &str, negated: bool, pattern: &str) -> String {
    let not = if negated { " NOT" } else { "" };
    format!("{}{} ILIKE {}", column, not, pattern)
}
