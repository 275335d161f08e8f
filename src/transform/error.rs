//! Errors raised while shaping results.
//!
//! All of them abort the whole transform; no partial result is returned.

use crate::error::ErrorKind;
use crate::model::MemberPath;

/// Result type for result transformation.
pub type TransformResult<T> = Result<T, TransformError>;

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error(
        "You requested hidden member: '{alias}'. Please make it visible using `shown: true`. \
         Please note primaryKey fields are `shown: false` by default."
    )]
    HiddenMember {
        alias: String,
        member: Option<MemberPath>,
    },

    #[error("QueryTimeDimension should be specified for the {mode} query.")]
    MissingTimeDimension { mode: &'static str },

    #[error("Exactly one QueryTimeDimension is supported for the {mode} query, got {count}.")]
    TooManyTimeDimensions { mode: &'static str, count: usize },

    #[error(
        "Inconsistent QueryTimeDimension configuration for the compare date range query, \
         dateRange required: {dimension}"
    )]
    MissingDateRange { dimension: String },

    #[error("Inconsistent dateRange configuration for the compare date range query: {range}")]
    UnboundedDateRange { range: String },

    #[error(
        "Inconsistent QueryTimeDimension configuration for the blending query, \
         granularity required: {dimension}"
    )]
    MissingGranularity { dimension: String },

    #[error(
        "Inconsistent QueryTimeDimension configuration for the blending query, \
         dimension required: {dimension}"
    )]
    MissingDimension { dimension: String },

    #[error("Blending time dimension '{member}' is not among the result columns.")]
    MissingBlendingColumn { member: String },

    #[error("Row {row} does not have the columns of the first row (column '{alias}').")]
    InconsistentRow { row: usize, alias: String },

    #[error("Invalid transform request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

impl TransformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::HiddenMember { .. } => ErrorKind::Visibility,
            _ => ErrorKind::Configuration,
        }
    }
}
