//! Result transformation.
//!
//! Turns driver rows into the response a client sees:
//!
//! ```text
//! DbRow (alias -> RawValue)
//!     |  resolve_members    (visibility, column order, legacy names)
//!     |  coerce_value       (time values to the wire format)
//!     v
//! TransformedData::Compact { members, dataset }  or  TransformedData::Vanilla(rows)
//! ```
//!
//! Everything here is pure and synchronous. A transform either returns every
//! row, in input order, or fails as a whole.

pub mod error;
pub mod keys;
pub mod members;
pub mod request;
pub mod row;
pub mod shape;
pub mod value;

pub use error::{TransformError, TransformResult};
pub use keys::{
    compute_blending_query_key, compute_blending_response_key, compute_date_range_value,
    BLENDING_QUERY_KEY_PREFIX, COMPARE_DATE_RANGE_FIELD, COMPARE_DATE_RANGE_SEPARATOR,
};
pub use members::{resolve_members, MemberMap, MemberSource, ResolvedMember};
pub use request::{
    transform_json, transform_request, transform_requests, TransformInput, TransformOutput,
    TransformRequest,
};
pub use row::{DbRow, VanillaRow};
pub use shape::{build_compact_row, build_vanilla_row};
pub use value::{coerce_value, RawValue, WireValue};

use serde::Serialize;

use crate::config::TransformSettings;
use crate::model::{AliasToMemberMap, Annotation, NormalizedQuery, QueryType, ResultType};
use members::visible_member;

/// A transformed result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TransformedData {
    Compact {
        members: Vec<String>,
        dataset: Vec<Vec<WireValue>>,
    },
    Vanilla(Vec<VanillaRow>),
}

impl TransformedData {
    pub fn row_count(&self) -> usize {
        match self {
            TransformedData::Compact { dataset, .. } => dataset.len(),
            TransformedData::Vanilla(rows) => rows.len(),
        }
    }
}

/// Transform `rows` into the response shape of `result_type`.
pub fn transform(
    query_type: QueryType,
    result_type: ResultType,
    query: &NormalizedQuery,
    annotation: &Annotation,
    alias_to_member: &AliasToMemberMap,
    rows: &[DbRow],
) -> TransformResult<TransformedData> {
    validate_query_mode(query_type, query)?;
    let members = resolve_members(query_type, query, rows, alias_to_member, annotation)?;
    let columns: Vec<&str> = rows.first().map(|r| r.aliases().collect()).unwrap_or_default();

    match result_type {
        ResultType::Compact => {
            let mut dataset = Vec::with_capacity(rows.len());
            for (index, row) in rows.iter().enumerate() {
                check_columns(index, &columns, row, alias_to_member, annotation)?;
                dataset.push(build_compact_row(
                    &members,
                    query_type,
                    &query.time_dimensions,
                    row,
                )?);
            }
            Ok(TransformedData::Compact {
                members: members.names(),
                dataset,
            })
        }
        ResultType::Vanilla => {
            let mut out = Vec::with_capacity(rows.len());
            for (index, row) in rows.iter().enumerate() {
                check_columns(index, &columns, row, alias_to_member, annotation)?;
                out.push(build_vanilla_row(
                    alias_to_member,
                    annotation,
                    query_type,
                    query,
                    row,
                )?);
            }
            Ok(TransformedData::Vanilla(out))
        }
    }
}

/// Fail on a malformed derived-mode query before touching any row.
fn validate_query_mode(query_type: QueryType, query: &NormalizedQuery) -> TransformResult<()> {
    match query_type {
        QueryType::Regular => {}
        QueryType::CompareDateRange => {
            compute_date_range_value(&query.time_dimensions)?;
        }
        QueryType::Blending => {
            compute_blending_query_key(&query.time_dimensions)?;
            compute_blending_response_key(&query.time_dimensions)?;
        }
    }
    Ok(())
}

/// A row must carry exactly the columns of the first row. An extra column
/// that maps to no visible member is a visibility failure.
fn check_columns(
    index: usize,
    columns: &[&str],
    row: &DbRow,
    alias_to_member: &AliasToMemberMap,
    annotation: &Annotation,
) -> TransformResult<()> {
    let inconsistent = |alias: &str| TransformError::InconsistentRow {
        row: index,
        alias: alias.to_string(),
    };
    if let Some(alias) = row.aliases().find(|alias| !columns.contains(alias)) {
        visible_member(alias, alias_to_member, annotation)?;
        return Err(inconsistent(alias));
    }
    if let Some(alias) = columns.iter().find(|alias| !row.contains(alias)) {
        return Err(inconsistent(alias));
    }
    Ok(())
}

/// Transformer configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Log a summary of every transform at debug level.
    pub debug_logging: bool,
    /// Shape used when a request does not name one.
    pub result_type: ResultType,
}

impl From<&TransformSettings> for TransformOptions {
    fn from(settings: &TransformSettings) -> Self {
        Self {
            debug_logging: settings.debug_logging,
            result_type: settings.result_type,
        }
    }
}

/// Configured entry point over [`transform`].
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    options: TransformOptions,
}

impl Transformer {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform one request.
    pub fn transform(&self, request: &TransformRequest) -> TransformResult<TransformedData> {
        let result_type = request.result_type.unwrap_or(self.options.result_type);
        let data = transform(
            request.query_type,
            result_type,
            &request.query,
            &request.annotation,
            &request.alias_to_member,
            &request.data,
        )?;

        if self.options.debug_logging {
            tracing::debug!(
                query_type = %request.query_type,
                result_type = %result_type,
                columns = request.data.first().map_or(0, DbRow::len),
                rows = data.row_count(),
                "transformed result"
            );
        }
        Ok(data)
    }

    /// Transform a batch; the first failure fails the batch.
    pub fn transform_all(
        &self,
        requests: &[TransformRequest],
    ) -> TransformResult<Vec<TransformedData>> {
        requests.iter().map(|request| self.transform(request)).collect()
    }
}
