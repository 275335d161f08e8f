//! # Prism
//!
//! SQL primitives and result shaping for an analytical query service.
//!
//! ## Architecture
//!
//! Prism sits on both sides of query execution:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        NormalizedQuery + Annotation (schema compiler)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql]
//! ┌─────────────────────────────────────────────────────────┐
//! │   SqlDialect primitives, FilterCompiler, ParamAllocator  │
//! │   (Vertica, Postgres)                                    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ query assembly + execution (elsewhere)
//! ┌─────────────────────────────────────────────────────────┐
//! │              DbRow (alias -> RawValue)                   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [transform]
//! ┌─────────────────────────────────────────────────────────┐
//! │     TransformedData: Vanilla rows or Compact dataset     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Both halves are pure and synchronous; a single [`sql::Dialect`] is shared
//! by every query that targets its engine.

pub mod config;
pub mod error;
pub mod model;
pub mod sql;
pub mod transform;

pub use error::{Error, ErrorKind, Result};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::model::{
        AliasToMemberMap, Annotation, MemberAnnotation, MemberPath, NormalizedQuery,
        QueryTimeDimension, QueryType, ResultType, SemanticType,
    };
    pub use crate::sql::{
        Dialect, FilterCompiler, FilterCondition, Granularity, MatchKind, MatchPredicate,
        ParamAllocator, SqlDialect,
    };
    pub use crate::transform::{
        transform, DbRow, RawValue, TransformOptions, TransformRequest, TransformedData,
        Transformer, WireValue,
    };
}
