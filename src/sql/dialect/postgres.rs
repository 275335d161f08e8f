//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`)
//! - Numbered `$n` parameters
//! - `::type` cast shorthand
//! - `||` string concatenation

use super::helpers;
use super::SqlDialect;
use crate::model::TIME_WIRE_FORMAT;
use crate::sql::error::DialectResult;
use crate::sql::filter::{MatchKind, ParamCast};
use crate::sql::granularity::Granularity;
use crate::sql::series::TimeRange;

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn truncate_to_granularity(&self, granularity: Granularity, date_expr: &str) -> String {
        helpers::date_trunc("date_trunc", granularity, date_expr)
    }

    fn convert_timezone(&self, field_expr: &str, timezone: &str) -> DialectResult<String> {
        let timezone = helpers::validate_timezone(timezone)?;
        Ok(format!("({}::timestamptz AT TIME ZONE '{}')", field_expr, timezone))
    }

    fn cast_timestamp_literal(&self, value_expr: &str) -> String {
        format!("{}::timestamptz", value_expr)
    }

    fn cast_date_time(&self, value_expr: &str) -> String {
        format!("{}::timestamp", value_expr)
    }

    fn timestamp_parse_format(&self) -> &'static str {
        TIME_WIRE_FORMAT
    }

    fn generate_date_series(&self, ranges: &[TimeRange]) -> DialectResult<String> {
        let values = helpers::values_ranges(ranges)?;
        Ok(format!(
            "SELECT dates.f::timestamp AS date_from, dates.t::timestamp AS date_to FROM (VALUES {}) AS dates (f, t)",
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
        match parts {
            [] => "''".into(),
            [single] => single.clone(),
            _ => format!("({})", parts.join(" || ")),
        }
    }

    fn boolean_indicator(&self, predicate: &str) -> String {
        helpers::case_indicator(predicate)
    }

    fn param_placeholder(&self, position: usize) -> String {
        format!("${}", position)
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
            ParamCast::Boolean => format!("{}::boolean", param),
            ParamCast::Number => format!("{}::numeric", param),
        }
    }
}
