//! Query-scoped parameter allocation.
//!
//! Fragments are compiled independently and may be composed by the assembler
//! in any order, so allocation does not hand out final placeholders. Each
//! value gets an opaque marker (`$0$`, `$1$`, ...) and
//! [`ParamAllocator::build_sql_and_params`] resolves the markers against the
//! finished statement: placeholders are numbered, and the parameter array is
//! emitted, strictly in order of appearance in the SQL text.

use regex::Regex;
use std::sync::LazyLock;

use super::dialect::SqlDialect;
use super::error::{DialectError, DialectResult};

static PARAM_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$(\d+)\$").unwrap());

/// Final SQL text and the parameters for its placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSql {
    pub sql: String,
    pub params: Vec<String>,
}

/// Collects parameter values for one query.
#[derive(Debug, Clone, Default)]
pub struct ParamAllocator {
    values: Vec<String>,
}

impl ParamAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` and return the marker standing in for it.
    pub fn allocate(&mut self, value: impl Into<String>) -> String {
        let index = self.values.len();
        self.values.push(value.into());
        format!("${}$", index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in allocation order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Replace markers with dialect placeholders and order the parameters to
    /// match.
    ///
    /// A marker that appears twice yields two placeholders and two copies of
    /// its value. Allocated values whose marker never made it into `sql` are
    /// dropped.
    pub fn build_sql_and_params(
        &self,
        sql: &str,
        dialect: &dyn SqlDialect,
    ) -> DialectResult<CompiledSql> {
        let mut out = String::with_capacity(sql.len());
        let mut params = Vec::with_capacity(self.values.len());
        let mut last = 0;

        for caps in PARAM_MARKER.captures_iter(sql) {
            let Some(marker) = caps.get(0) else {
                continue;
            };
            let index = caps[1].parse::<usize>().unwrap_or(usize::MAX);
            let value = self
                .values
                .get(index)
                .ok_or(DialectError::UnknownParam(index))?;

            out.push_str(&sql[last..marker.start()]);
            params.push(value.clone());
            out.push_str(&dialect.param_placeholder(params.len()));
            last = marker.end();
        }
        out.push_str(&sql[last..]);

        Ok(CompiledSql { sql: out, params })
    }
}
