//! Vertica SQL dialect.
//!
//! Vertica features:
//! - ANSI identifier quoting (`"`)
//! - Positional `?` parameters
//! - `AT TIMEZONE` conversion
//! - `TO_TIMESTAMP` with an explicit format for wire timestamps
//! - Two-argument `CONCAT` only

use super::helpers;
use super::SqlDialect;
use crate::model::TIME_WIRE_FORMAT;
use crate::sql::error::DialectResult;
use crate::sql::filter::{MatchKind, ParamCast};
use crate::sql::granularity::Granularity;
use crate::sql::series::TimeRange;

/// Vertica format string equivalent to the wire format.
const TIMESTAMP_FORMAT: &str = "YYYY-MM-DD\"T\"HH24:MI:SS.MS";

/// Vertica SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Vertica;

impl SqlDialect for Vertica {
    fn name(&self) -> &'static str {
        "vertica"
    }

    fn truncate_to_granularity(&self, granularity: Granularity, date_expr: &str) -> String {
        helpers::date_trunc("DATE_TRUNC", granularity, date_expr)
    }

    fn convert_timezone(&self, field_expr: &str, timezone: &str) -> DialectResult<String> {
        let timezone = helpers::validate_timezone(timezone)?;
        Ok(format!("{} AT TIMEZONE '{}'", field_expr, timezone))
    }

    fn cast_timestamp_literal(&self, value_expr: &str) -> String {
        format!("TO_TIMESTAMP({}, '{}')", value_expr, TIMESTAMP_FORMAT)
    }

    fn cast_date_time(&self, value_expr: &str) -> String {
        format!("{}::TIMESTAMP", value_expr)
    }

    fn timestamp_parse_format(&self) -> &'static str {
        TIME_WIRE_FORMAT
    }

    fn generate_date_series(&self, ranges: &[TimeRange]) -> DialectResult<String> {
        let values = helpers::union_all_ranges(ranges)?;
        Ok(format!(
            "SELECT dates.f::TIMESTAMP date_from, dates.t::TIMESTAMP date_to FROM ({}) AS dates",
            values
        ))
    }

    fn current_unix_timestamp(&self) -> String {
        "EXTRACT(EPOCH FROM NOW())".into()
    }

    fn escape_identifier(&self, name: &str) -> String {
        helpers::quote_double(name)
    }

    fn concat_strings(&self, parts: &[String]) -> String {
        // CONCAT takes exactly two arguments, so longer lists nest.
        let mut iter = parts.iter();
        let Some(first) = iter.next() else {
            return "''".into();
        };
        iter.fold(first.clone(), |acc, part| format!("CONCAT({}, {})", acc, part))
    }

    fn boolean_indicator(&self, predicate: &str) -> String {
        helpers::case_indicator(predicate)
    }

    fn param_placeholder(&self, _position: usize) -> String {
        "?".into()
    }

    fn like_ignore_case(
        &self,
        column: &str,
        negated: bool,
        kind: MatchKind,
        param: &str,
    ) -> String {
        let (prefix, suffix) = helpers::like_wildcards(kind);
        let mut parts = Vec::with_capacity(3);
        if !prefix.is_empty() {
            parts.push(helpers::quote_string_single(prefix));
        }
        parts.push(param.to_string());
        if !suffix.is_empty() {
            parts.push(helpers::quote_string_single(suffix));
        }
        helpers::ilike(column, negated, &self.concat_strings(&parts))
    }

    fn cast_parameter(&self, param: &str, cast: ParamCast) -> String {
        match cast {
            ParamCast::Untyped => param.to_string(),
            ParamCast::Boolean => format!("CAST({} AS BOOLEAN)", param),
            ParamCast::Number => format!("CAST({} AS DOUBLE PRECISION)", param),
        }
    }
}
