//! Query and schema metadata consumed by the SQL and transform layers.
//!
//! Everything here is produced upstream by the schema compiler and treated as
//! immutable input for the duration of one query.

pub mod annotation;
pub mod member;
pub mod query;
pub mod time;

pub use annotation::{AliasToMemberMap, Annotation, MemberAnnotation, SemanticType};
pub use member::{MemberPath, MEMBER_SEPARATOR};
pub use query::{
    DateRange, FilterOperator, NormalizedQuery, Order, QueryFilter, QueryTimeDimension,
    QueryType, ResultType,
};
pub use time::{format_timestamp, parse_timestamp, TIME_WIRE_FORMAT};
