//! Filter compilation.
//!
//! Turns single-member filter conditions into SQL predicates. Every literal
//! goes through the query's [`ParamAllocator`]; nothing user-supplied is ever
//! spliced into the SQL text. Parameter casts are chosen from the declared
//! semantic type of the filtered member, never from the shape of the value.

use serde::{Deserialize, Serialize};

use super::dialect::SqlDialect;
use super::error::{DialectError, DialectResult};
use super::params::{CompiledSql, ParamAllocator};
use crate::model::{FilterOperator, SemanticType};

/// Wildcard placement of a pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    Contains,
    StartsWith,
    EndsWith,
    Equals,
}

/// Cast applied to a filter parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamCast {
    Untyped,
    Boolean,
    Number,
}

impl ParamCast {
    /// Cast required for a member of the given declared type.
    pub fn for_member(member_type: SemanticType) -> Self {
        match member_type {
            SemanticType::Boolean => ParamCast::Boolean,
            SemanticType::Number => ParamCast::Number,
            _ => ParamCast::Untyped,
        }
    }
}

/// One case-insensitive pattern predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPredicate {
    pub column: String,
    pub negated: bool,
    pub kind: MatchKind,
    pub value: String,
}

impl MatchPredicate {
    pub fn new(column: impl Into<String>, kind: MatchKind, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            negated: false,
            kind,
            value: value.into(),
        }
    }

    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }
}

/// A filter on one member, with the member's column expression already
/// rendered by the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub column: String,
    pub member_type: SemanticType,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl FilterCondition {
    pub fn new(
        column: impl Into<String>,
        member_type: SemanticType,
        operator: FilterOperator,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            column: column.into(),
            member_type,
            operator,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Compiles filter predicates for one query.
///
/// Holds the query's parameter list; call [`FilterCompiler::build`] on the
/// finished statement to obtain placeholders and parameters in order.
#[derive(Debug)]
pub struct FilterCompiler<'d> {
    dialect: &'d dyn SqlDialect,
    params: ParamAllocator,
}

impl<'d> FilterCompiler<'d> {
    pub fn new(dialect: &'d dyn SqlDialect) -> Self {
        Self {
            dialect,
            params: ParamAllocator::new(),
        }
    }

    pub fn dialect(&self) -> &'d dyn SqlDialect {
        self.dialect
    }

    pub fn params(&self) -> &ParamAllocator {
        &self.params
    }

    /// Allocate an untyped parameter.
    pub fn allocate_param(&mut self, value: impl Into<String>) -> String {
        self.params.allocate(value)
    }

    /// Allocate a parameter cast for the target member's declared type.
    pub fn cast_param(&mut self, value: impl Into<String>, member_type: SemanticType) -> String {
        let param = self.params.allocate(value);
        self.dialect
            .cast_parameter(&param, ParamCast::for_member(member_type))
    }

    /// Allocate a parameter parsed as a wire-format timestamp.
    pub fn timestamp_param(&mut self, value: impl Into<String>) -> String {
        let param = self.params.allocate(value);
        self.dialect.cast_timestamp_literal(&param)
    }

    /// Render a pattern predicate.
    pub fn compile_match(&mut self, predicate: &MatchPredicate) -> String {
        let param = self.params.allocate(predicate.value.clone());
        self.dialect
            .like_ignore_case(&predicate.column, predicate.negated, predicate.kind, &param)
    }

    /// Render one filter condition.
    pub fn compile_filter(&mut self, condition: &FilterCondition) -> DialectResult<String> {
        let column = condition.column.as_str();
        let op = condition.operator;

        let sql = match op {
            FilterOperator::Equals | FilterOperator::In => {
                let values = at_least_one(condition)?;
                self.compile_equality(column, condition.member_type, values, false)
            }
            FilterOperator::NotEquals | FilterOperator::NotIn => {
                let values = at_least_one(condition)?;
                let inner = self.compile_equality(column, condition.member_type, values, true);
                format!("({} OR {} IS NULL)", inner, column)
            }
            FilterOperator::Contains => {
                self.compile_pattern(condition, MatchKind::Contains, false)?
            }
            FilterOperator::NotContains => {
                self.compile_pattern(condition, MatchKind::Contains, true)?
            }
            FilterOperator::StartsWith => {
                self.compile_pattern(condition, MatchKind::StartsWith, false)?
            }
            FilterOperator::NotStartsWith => {
                self.compile_pattern(condition, MatchKind::StartsWith, true)?
            }
            FilterOperator::EndsWith => {
                self.compile_pattern(condition, MatchKind::EndsWith, false)?
            }
            FilterOperator::NotEndsWith => {
                self.compile_pattern(condition, MatchKind::EndsWith, true)?
            }
            FilterOperator::Gt | FilterOperator::Gte | FilterOperator::Lt | FilterOperator::Lte => {
                let value = exactly_one(condition)?;
                let param = self.cast_param(value, condition.member_type);
                format!("{} {} {}", column, comparison(op), param)
            }
            FilterOperator::Set => format!("{} IS NOT NULL", column),
            FilterOperator::NotSet => format!("{} IS NULL", column),
            FilterOperator::InDateRange | FilterOperator::OnTheDate => {
                let (from, to) = exactly_two(condition)?;
                let from = self.timestamp_param(from);
                let to = self.timestamp_param(to);
                format!("({} >= {} AND {} <= {})", column, from, column, to)
            }
            FilterOperator::NotInDateRange => {
                let (from, to) = exactly_two(condition)?;
                let from = self.timestamp_param(from);
                let to = self.timestamp_param(to);
                format!("({} < {} OR {} > {})", column, from, column, to)
            }
            FilterOperator::BeforeDate
            | FilterOperator::BeforeOrOnDate
            | FilterOperator::AfterDate
            | FilterOperator::AfterOrOnDate => {
                let value = exactly_one(condition)?;
                let param = self.timestamp_param(value);
                format!("{} {} {}", column, comparison(op), param)
            }
        };

        Ok(sql)
    }

    /// Render several conditions joined with `AND`, in order.
    ///
    /// Returns `None` when there is nothing to filter on.
    pub fn compile_filters(
        &mut self,
        conditions: &[FilterCondition],
    ) -> DialectResult<Option<String>> {
        let mut parts = Vec::with_capacity(conditions.len());
        for condition in conditions {
            parts.push(self.compile_filter(condition)?);
        }
        Ok(match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(parts.join(" AND ")),
        })
    }

    /// Resolve parameter markers in the finished statement.
    pub fn build(&self, sql: &str) -> DialectResult<CompiledSql> {
        self.params.build_sql_and_params(sql, self.dialect)
    }

    fn compile_equality(
        &mut self,
        column: &str,
        member_type: SemanticType,
        values: &[String],
        negated: bool,
    ) -> String {
        if let [value] = values {
            let param = self.cast_param(value.clone(), member_type);
            let op = if negated { "<>" } else { "=" };
            return format!("{} {} {}", column, op, param);
        }

        let params: Vec<String> = values
            .iter()
            .map(|v| self.cast_param(v.clone(), member_type))
            .collect();
        let op = if negated { "NOT IN" } else { "IN" };
        format!("{} {} ({})", column, op, params.join(", "))
    }

    fn compile_pattern(
        &mut self,
        condition: &FilterCondition,
        kind: MatchKind,
        negated: bool,
    ) -> DialectResult<String> {
        let values = at_least_one(condition)?;
        let predicates: Vec<String> = values
            .iter()
            .map(|value| {
                let mut predicate =
                    MatchPredicate::new(condition.column.clone(), kind, value.clone());
                predicate.negated = negated;
                self.compile_match(&predicate)
            })
            .collect();

        if negated {
            Ok(format!(
                "({} OR {} IS NULL)",
                predicates.join(" AND "),
                condition.column
            ))
        } else if predicates.len() == 1 {
            Ok(predicates.concat())
        } else {
            Ok(format!("({})", predicates.join(" OR ")))
        }
    }
}

fn comparison(op: FilterOperator) -> &'static str {
    match op {
        FilterOperator::Gt | FilterOperator::AfterDate => ">",
        FilterOperator::Gte | FilterOperator::AfterOrOnDate => ">=",
        FilterOperator::Lt | FilterOperator::BeforeDate => "<",
        FilterOperator::Lte | FilterOperator::BeforeOrOnDate => "<=",
        _ => "=",
    }
}

fn invalid(condition: &FilterCondition, reason: impl Into<String>) -> DialectError {
    DialectError::InvalidFilter {
        operator: condition.operator,
        reason: reason.into(),
    }
}

fn at_least_one(condition: &FilterCondition) -> DialectResult<&[String]> {
    if condition.values.is_empty() {
        return Err(invalid(condition, "at least one value required"));
    }
    Ok(&condition.values)
}

fn exactly_one(condition: &FilterCondition) -> DialectResult<&str> {
    match condition.values.as_slice() {
        [value] => Ok(value),
        other => Err(invalid(
            condition,
            format!("exactly one value required, got {}", other.len()),
        )),
    }
}

fn exactly_two(condition: &FilterCondition) -> DialectResult<(&str, &str)> {
    match condition.values.as_slice() {
        [from, to] => Ok((from, to)),
        other => Err(invalid(
            condition,
            format!("a [from, to] pair required, got {} values", other.len()),
        )),
    }
}
