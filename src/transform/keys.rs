//! Synthetic keys of derived query modes.
//!
//! A compare-date-range result carries a label of the range it was computed
//! for; a blending result carries the time bucket under a key shared by all
//! blended queries.

use super::error::{TransformError, TransformResult};
use crate::model::{DateRange, MemberPath, QueryTimeDimension};

/// Name of the synthetic compare-date-range member.
pub const COMPARE_DATE_RANGE_FIELD: &str = "compareDateRange";

/// Separator between the bounds of a compare-date-range label.
pub const COMPARE_DATE_RANGE_SEPARATOR: &str = " - ";

/// Prefix of the synthetic blending member.
pub const BLENDING_QUERY_KEY_PREFIX: &str = "time.";

const COMPARE_DATE_RANGE_MODE: &str = "compare date range";
const BLENDING_MODE: &str = "blending";

/// Label of the date range a compare-date-range query covers: `"<from> - <to>"`.
pub fn compute_date_range_value(time_dimensions: &[QueryTimeDimension]) -> TransformResult<String> {
    let td = sole_time_dimension(time_dimensions, COMPARE_DATE_RANGE_MODE)?;
    match &td.date_range {
        Some(DateRange::Bounded(from, to)) => {
            Ok(format!("{from}{COMPARE_DATE_RANGE_SEPARATOR}{to}"))
        }
        Some(DateRange::Relative(range)) => Err(TransformError::UnboundedDateRange {
            range: range.clone(),
        }),
        None => Err(TransformError::MissingDateRange {
            dimension: td.to_string(),
        }),
    }
}

/// Key of the blending member, `time.<granularity>`.
pub fn compute_blending_query_key(
    time_dimensions: &[QueryTimeDimension],
) -> TransformResult<String> {
    let td = sole_time_dimension(time_dimensions, BLENDING_MODE)?;
    let granularity = blending_granularity(td)?;
    Ok(format!("{BLENDING_QUERY_KEY_PREFIX}{granularity}"))
}

/// Member whose value the blending member repeats, `<dimension>.<granularity>`.
pub fn compute_blending_response_key(
    time_dimensions: &[QueryTimeDimension],
) -> TransformResult<MemberPath> {
    let td = sole_time_dimension(time_dimensions, BLENDING_MODE)?;
    let granularity = blending_granularity(td)?;
    let dimension = td
        .dimension
        .as_ref()
        .ok_or_else(|| TransformError::MissingDimension {
            dimension: td.to_string(),
        })?;
    Ok(dimension.with_granularity(granularity))
}

fn blending_granularity(td: &QueryTimeDimension) -> TransformResult<&str> {
    td.granularity
        .as_deref()
        .ok_or_else(|| TransformError::MissingGranularity {
            dimension: td.to_string(),
        })
}

fn sole_time_dimension<'a>(
    time_dimensions: &'a [QueryTimeDimension],
    mode: &'static str,
) -> TransformResult<&'a QueryTimeDimension> {
    match time_dimensions {
        [] => Err(TransformError::MissingTimeDimension { mode }),
        [td] => Ok(td),
        _ => Err(TransformError::TooManyTimeDimensions {
            mode,
            count: time_dimensions.len(),
        }),
    }
}
