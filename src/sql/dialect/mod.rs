//! SQL dialect primitives.
//!
//! The query assembler never writes engine-specific SQL itself. Everything that
//! differs between engines goes through the closed set of primitives on
//! [`SqlDialect`]:
//!
//! - Time: truncation to a granularity, timezone conversion, timestamp
//!   parse/cast, date-series subqueries for gap filling, current unix time
//! - Identifier escaping and string concatenation
//! - Boolean predicate to 0/1 indicator
//! - Filter support: parameter placeholders, case-insensitive pattern
//!   matching, type-directed parameter casts
//!
//! None of the primitives has a default. Supporting a new engine means
//! implementing every method, and registering it in [`Dialect`].
//!
//! # Usage
//!
//! ```ignore
//! use prism::sql::{Dialect, Granularity, SqlDialect};
//!
//! let dialect: Dialect = "vertica".parse()?;
//! let sql = dialect.truncate_to_granularity(Granularity::Month, "\"orders\".created_at");
//! // DATE_TRUNC('month', "orders".created_at)
//! ```
//!
//! | Primitive | Vertica | PostgreSQL |
//! |-----------|---------|------------|
//! | Placeholder | `?` | `$n` |
//! | Timezone | `AT TIMEZONE` | `::timestamptz AT TIME ZONE` |
//! | Timestamp cast | `TO_TIMESTAMP(v, fmt)` | `v::timestamptz` |
//! | Pattern match | `ILIKE CONCAT(...)` | `ILIKE ('%' \|\| v \|\| '%')` |
//! | Number cast | `CAST(v AS DOUBLE)` | `v::numeric` |

pub mod helpers;
mod postgres;
mod vertica;

pub use postgres::Postgres;
pub use vertica::Vertica;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::{DialectError, DialectResult};
use super::filter::{MatchKind, ParamCast};
use super::granularity::Granularity;
use super::series::TimeRange;

/// SQL dialect trait - the primitive operations every engine must provide.
///
/// Implementations are stateless and shared across concurrent queries.
pub trait SqlDialect: std::fmt::Debug + Send + Sync {
    /// Dialect identifier for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Time
    // =========================================================================

    /// Truncate a date expression to the start of its granularity bucket.
    fn truncate_to_granularity(&self, granularity: Granularity, date_expr: &str) -> String;

    /// Convert a timestamp expression into the given timezone.
    ///
    /// Fails with [`DialectError::InvalidTimezone`] for names that are not a
    /// plain IANA zone or UTC offset.
    fn convert_timezone(&self, field_expr: &str, timezone: &str) -> DialectResult<String>;

    /// Parse a wire-format timestamp literal (or placeholder) into a timestamp.
    fn cast_timestamp_literal(&self, value_expr: &str) -> String;

    /// Cast an expression to a timezone-less datetime.
    fn cast_date_time(&self, value_expr: &str) -> String;

    /// chrono pattern of the strings [`SqlDialect::cast_timestamp_literal`] parses.
    ///
    /// Must equal [`crate::model::TIME_WIRE_FORMAT`] so that values emitted by
    /// result coercion can be fed back as filter parameters unchanged.
    fn timestamp_parse_format(&self) -> &'static str;

    /// Subquery yielding one `(date_from, date_to)` row per range, in order.
    fn generate_date_series(&self, ranges: &[TimeRange]) -> DialectResult<String>;

    /// Current time as unix seconds.
    fn current_unix_timestamp(&self) -> String;

    // =========================================================================
    // Identifiers and Strings
    // =========================================================================

    /// Quote an identifier (table, column, alias).
    fn escape_identifier(&self, name: &str) -> String;

    /// Concatenate string expressions.
    fn concat_strings(&self, parts: &[String]) -> String;

    /// Render a boolean predicate as a numeric 0/1 expression.
    fn boolean_indicator(&self, predicate: &str) -> String;

    // =========================================================================
    // Filters
    // =========================================================================

    /// Placeholder text for the parameter at 1-based `position`.
    fn param_placeholder(&self, position: usize) -> String;

    /// Case-insensitive pattern match of `column` against a parameter.
    ///
    /// Wildcard placement depends only on `kind`; `negated` adds the logical
    /// negation and nothing else.
    fn like_ignore_case(&self, column: &str, negated: bool, kind: MatchKind, param: &str)
        -> String;

    /// Wrap a parameter in the cast required by its target member type.
    fn cast_parameter(&self, param: &str, cast: ParamCast) -> String;
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Vertica,
    #[serde(alias = "postgresql")]
    Postgres,
}

impl Dialect {
    /// Every registered dialect.
    pub fn all() -> &'static [Dialect] {
        &[Dialect::Vertica, Dialect::Postgres]
    }

    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Vertica => &Vertica,
            Dialect::Postgres => &Postgres,
        }
    }

    /// Truncate by granularity name.
    ///
    /// Unknown names fail immediately instead of falling back to some other
    /// bucket size.
    pub fn time_grouped_column(&self, granularity: &str, date_expr: &str) -> DialectResult<String> {
        let granularity: Granularity = granularity.parse()?;
        Ok(self.truncate_to_granularity(granularity, date_expr))
    }
}

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vertica" => Ok(Dialect::Vertica),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            other => Err(DialectError::UnknownDialect(other.to_string())),
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn truncate_to_granularity(&self, granularity: Granularity, date_expr: &str) -> String {
        self.dialect().truncate_to_granularity(granularity, date_expr)
    }

    fn convert_timezone(&self, field_expr: &str, timezone: &str) -> DialectResult<String> {
        self.dialect().convert_timezone(field_expr, timezone)
    }

    fn cast_timestamp_literal(&self, value_expr: &str) -> String {
        self.dialect().cast_timestamp_literal(value_expr)
    }

    fn cast_date_time(&self, value_expr: &str) -> String {
        self.dialect().cast_date_time(value_expr)
    }

    fn timestamp_parse_format(&self) -> &'static str {
        self.dialect().timestamp_parse_format()
    }

    fn generate_date_series(&self, ranges: &[TimeRange]) -> DialectResult<String> {
        self.dialect().generate_date_series(ranges)
    }

    fn current_unix_timestamp(&self) -> String {
        self.dialect().current_unix_timestamp()
    }

    fn escape_identifier(&self, name: &str) -> String {
        self.dialect().escape_identifier(name)
    }

    fn concat_strings(&self, parts: &[String]) -> String {
        self.dialect().concat_strings(parts)
    }

    fn boolean_indicator(&self, predicate: &str) -> String {
        self.dialect().boolean_indicator(predicate)
    }

    fn param_placeholder(&self, position: usize) -> String {
        self.dialect().param_placeholder(position)
    }

    fn like_ignore_case(
        &self,
        column: &str,
        negated: bool,
        kind: MatchKind,
        param: &str,
    ) -> String {
        self.dialect().like_ignore_case(column, negated, kind, param)
    }

    fn cast_parameter(&self, param: &str, cast: ParamCast) -> String {
        self.dialect().cast_parameter(param, cast)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
