//! Errors raised while generating SQL.
//!
//! These indicate a defect in the caller or in a dialect implementation, never
//! a recoverable runtime condition.

use crate::model::FilterOperator;

/// Result type for SQL generation.
pub type DialectResult<T> = Result<T, DialectError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    #[error("Unknown granularity '{0}'. Expected one of: second, minute, hour, day, week, month, quarter, year")]
    UnknownGranularity(String),

    #[error("Unknown dialect '{0}'")]
    UnknownDialect(String),

    #[error("Invalid timezone '{0}'")]
    InvalidTimezone(String),

    #[error("Date series requires at least one time range")]
    EmptyDateSeries,

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Invalid '{operator}' filter: {reason}")]
    InvalidFilter {
        operator: FilterOperator,
        reason: String,
    },

    #[error("Parameter marker ${0}$ was never allocated")]
    UnknownParam(usize),
}
