//! Normalized query types.
//!
//! These are produced by the schema compiler and are read-only here: the SQL
//! layer reads filters from them and the result transformer reads the
//! requested dimensions and time dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::member::MemberPath;

/// A query after schema resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuery {
    #[serde(default)]
    pub measures: Vec<MemberPath>,

    #[serde(default)]
    pub dimensions: Vec<MemberPath>,

    #[serde(default)]
    pub time_dimensions: Vec<QueryTimeDimension>,

    #[serde(default)]
    pub segments: Vec<MemberPath>,

    #[serde(default)]
    pub filters: Vec<QueryFilter>,

    #[serde(default)]
    pub order: Vec<Order>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl NormalizedQuery {
    /// Whether `member` was requested as a plain dimension.
    pub fn has_dimension(&self, member: &MemberPath) -> bool {
        self.dimensions.iter().any(|d| d == member)
    }
}

/// A time dimension entry of a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTimeDimension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<MemberPath>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl QueryTimeDimension {
    pub fn new(dimension: impl Into<MemberPath>) -> Self {
        Self {
            dimension: Some(dimension.into()),
            ..Default::default()
        }
    }

    pub fn with_granularity(mut self, granularity: impl Into<String>) -> Self {
        self.granularity = Some(granularity.into());
        self
    }

    pub fn with_date_range(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.date_range = Some(DateRange::Bounded(from.into(), to.into()));
        self
    }

    pub fn with_relative_range(mut self, range: impl Into<String>) -> Self {
        self.date_range = Some(DateRange::Relative(range.into()));
        self
    }
}

impl fmt::Display for QueryTimeDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.dimension {
            Some(dimension) => write!(f, "{dimension}")?,
            None => write!(f, "<no dimension>")?,
        }
        if let Some(granularity) = &self.granularity {
            write!(f, " by {granularity}")?;
        }
        if let Some(range) = &self.date_range {
            write!(f, " over {range}")?;
        }
        Ok(())
    }
}

/// Date range bound of a time dimension.
///
/// A relative range (`"last week"`) is only meaningful to the schema
/// compiler; derived query modes require the bounded form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateRange {
    Relative(String),
    Bounded(String, String),
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRange::Relative(range) => write!(f, "'{range}'"),
            DateRange::Bounded(from, to) => write!(f, "['{from}', '{to}']"),
        }
    }
}

/// Sort entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: MemberPath,
    #[serde(default)]
    pub desc: bool,
}

/// A filter on a single member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub member: MemberPath,
    pub operator: FilterOperator,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Filter operators of the normalized query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    In,
    NotIn,
    Contains,
    NotContains,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
    Gt,
    Gte,
    Lt,
    Lte,
    Set,
    NotSet,
    InDateRange,
    NotInDateRange,
    OnTheDate,
    BeforeDate,
    BeforeOrOnDate,
    AfterDate,
    AfterOrOnDate,
}

impl FilterOperator {
    /// Wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "notEquals",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "notIn",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "notContains",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::NotStartsWith => "notStartsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::NotEndsWith => "notEndsWith",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Set => "set",
            FilterOperator::NotSet => "notSet",
            FilterOperator::InDateRange => "inDateRange",
            FilterOperator::NotInDateRange => "notInDateRange",
            FilterOperator::OnTheDate => "onTheDate",
            FilterOperator::BeforeDate => "beforeDate",
            FilterOperator::BeforeOrOnDate => "beforeOrOnDate",
            FilterOperator::AfterDate => "afterDate",
            FilterOperator::AfterOrOnDate => "afterOrOnDate",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which synthetic fields a result carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QueryType {
    #[default]
    #[serde(rename = "regular", alias = "regularQuery")]
    Regular,
    #[serde(rename = "compareDateRangeQuery")]
    CompareDateRange,
    #[serde(rename = "blendingQuery")]
    Blending,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Regular => "regular",
            QueryType::CompareDateRange => "compareDateRangeQuery",
            QueryType::Blending => "blendingQuery",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output shape of a transformed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResultType {
    /// Array of keyed objects.
    #[default]
    #[serde(rename = "default")]
    Vanilla,
    /// Member header plus positional rows.
    #[serde(rename = "compact")]
    Compact,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultType::Vanilla => f.write_str("default"),
            ResultType::Compact => f.write_str("compact"),
        }
    }
}
