//! SQL generation primitives.
//!
//! This module provides everything engine-specific that the query assembler
//! needs, without assembling statements itself:
//!
//! - [`dialect`] - The [`SqlDialect`] contract and the [`Dialect`] registry
//! - [`filter`] - Filter predicates with type-directed parameter casts
//! - [`params`] - Query-scoped parameter allocation
//! - [`series`] - Time series buckets for gap filling
//! - [`granularity`] - Time truncation units

pub mod dialect;
pub mod error;
pub mod filter;
pub mod granularity;
pub mod params;
pub mod series;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, Postgres, SqlDialect, Vertica};
pub use error::{DialectError, DialectResult};
pub use filter::{FilterCompiler, FilterCondition, MatchKind, MatchPredicate, ParamCast};
pub use granularity::Granularity;
pub use params::{CompiledSql, ParamAllocator};
pub use series::{time_series, TimeRange, MAX_SERIES_LEN};
