//! Member resolution.
//!
//! Maps the columns of a result onto the members returned to the client,
//! in column order, and enforces visibility: a column is only returned if
//! its member has an annotation entry.

use super::error::{TransformError, TransformResult};
use super::keys::{
    compute_blending_query_key, compute_blending_response_key, COMPARE_DATE_RANGE_FIELD,
};
use super::row::DbRow;
use crate::model::{
    AliasToMemberMap, Annotation, MemberAnnotation, MemberPath, NormalizedQuery, QueryType,
    SemanticType,
};

/// Where a resolved member takes its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSource {
    /// A result column.
    Column {
        alias: String,
        member_type: SemanticType,
    },
    /// The compare-date-range label; computed from the query, not read.
    CompareDateRange,
    /// The blending key; repeats the time dimension column.
    BlendingKey {
        alias: String,
        member_type: SemanticType,
    },
}

impl MemberSource {
    /// Backing column alias, if the value is read from the row.
    pub fn alias(&self) -> Option<&str> {
        match self {
            MemberSource::Column { alias, .. } | MemberSource::BlendingKey { alias, .. } => {
                Some(alias)
            }
            MemberSource::CompareDateRange => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    pub name: String,
    pub source: MemberSource,
}

/// Resolved members in response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberMap {
    members: Vec<ResolvedMember>,
}

impl MemberMap {
    fn insert(&mut self, name: impl Into<String>, source: MemberSource) {
        let name = name.into();
        match self.members.iter_mut().find(|m| m.name == name) {
            Some(member) => member.source = source,
            None => self.members.push(ResolvedMember { name, source }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MemberSource> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .map(|m| &m.source)
    }

    /// Column alias backing `name`.
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(MemberSource::alias)
    }

    pub fn names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedMember> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Resolve the members of a result from the columns of its first row.
///
/// No rows resolve to no members. A three-segment member is also exposed under
/// its two-segment name unless the query asked for that name as a plain
/// dimension. Derived query modes append their synthetic member last.
pub fn resolve_members(
    query_type: QueryType,
    query: &NormalizedQuery,
    rows: &[DbRow],
    alias_to_member: &AliasToMemberMap,
    annotation: &Annotation,
) -> TransformResult<MemberMap> {
    let mut members = MemberMap::default();
    let Some(first) = rows.first() else {
        return Ok(members);
    };

    for alias in first.aliases() {
        let (member, member_annotation) = visible_member(alias, alias_to_member, annotation)?;
        let source = MemberSource::Column {
            alias: alias.to_string(),
            member_type: member_annotation.member_type,
        };
        if let Some(base) = legacy_name(member, query) {
            members.insert(member.as_str(), source.clone());
            members.insert(base.as_str(), source);
        } else {
            members.insert(member.as_str(), source);
        }
    }

    match query_type {
        QueryType::Regular => {}
        QueryType::CompareDateRange => {
            members.insert(COMPARE_DATE_RANGE_FIELD, MemberSource::CompareDateRange);
        }
        QueryType::Blending => {
            let key = compute_blending_query_key(&query.time_dimensions)?;
            let response_key = compute_blending_response_key(&query.time_dimensions)?;
            let source = match members.get(response_key.as_str()) {
                Some(MemberSource::Column { alias, member_type }) => MemberSource::BlendingKey {
                    alias: alias.clone(),
                    member_type: *member_type,
                },
                _ => {
                    return Err(TransformError::MissingBlendingColumn {
                        member: response_key.to_string(),
                    })
                }
            };
            members.insert(key, source);
        }
    }

    Ok(members)
}

/// Member and annotation behind `alias`, or a visibility error.
pub(crate) fn visible_member<'a>(
    alias: &str,
    alias_to_member: &'a AliasToMemberMap,
    annotation: &'a Annotation,
) -> TransformResult<(&'a MemberPath, &'a MemberAnnotation)> {
    let member = alias_to_member
        .get(alias)
        .ok_or_else(|| TransformError::HiddenMember {
            alias: alias.to_string(),
            member: None,
        })?;
    let member_annotation = annotation
        .get(member)
        .ok_or_else(|| TransformError::HiddenMember {
            alias: alias.to_string(),
            member: Some(member.clone()),
        })?;
    Ok((member, member_annotation))
}

/// Two-segment name a granular member is also exposed under.
pub(crate) fn legacy_name(member: &MemberPath, query: &NormalizedQuery) -> Option<MemberPath> {
    member
        .without_granularity()
        .filter(|base| !query.has_dimension(base))
}
