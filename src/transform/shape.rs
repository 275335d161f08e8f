//! Per-row shaping into the two response forms.

use super::error::{TransformError, TransformResult};
use super::keys::{
    compute_blending_query_key, compute_blending_response_key, compute_date_range_value,
    COMPARE_DATE_RANGE_FIELD,
};
use super::members::{legacy_name, visible_member, MemberMap, MemberSource};
use super::row::{DbRow, VanillaRow};
use super::value::{coerce_value, RawValue, WireValue};
use crate::model::{AliasToMemberMap, Annotation, NormalizedQuery, QueryTimeDimension, QueryType};

/// Positional values of `row`, one per resolved member.
///
/// `members` already carries each member's type, so the annotation is not
/// consulted again. A missing column reads as null.
pub fn build_compact_row(
    members: &MemberMap,
    query_type: QueryType,
    time_dimensions: &[QueryTimeDimension],
    row: &DbRow,
) -> TransformResult<Vec<WireValue>> {
    let date_range = match query_type {
        QueryType::CompareDateRange => Some(compute_date_range_value(time_dimensions)?),
        _ => None,
    };

    let mut values = Vec::with_capacity(members.len());
    for member in members.iter() {
        let value = match &member.source {
            MemberSource::Column { alias, member_type }
            | MemberSource::BlendingKey { alias, member_type } => {
                coerce_value(row.get(alias).unwrap_or(&RawValue::Null), *member_type)
            }
            MemberSource::CompareDateRange => date_range
                .clone()
                .map_or(WireValue::Null, WireValue::String),
        };
        values.push(value);
    }
    Ok(values)
}

/// Keyed values of `row`.
pub fn build_vanilla_row(
    alias_to_member: &AliasToMemberMap,
    annotation: &Annotation,
    query_type: QueryType,
    query: &NormalizedQuery,
    row: &DbRow,
) -> TransformResult<VanillaRow> {
    let mut out = VanillaRow::with_capacity(row.len() + 1);
    for (alias, raw) in row.iter() {
        let (member, member_annotation) = visible_member(alias, alias_to_member, annotation)?;
        let value = coerce_value(raw, member_annotation.member_type);
        if let Some(base) = legacy_name(member, query) {
            out.insert(member.as_str(), value.clone());
            out.insert(base.as_str(), value);
        } else {
            out.insert(member.as_str(), value);
        }
    }

    match query_type {
        QueryType::Regular => {}
        QueryType::CompareDateRange => {
            let label = compute_date_range_value(&query.time_dimensions)?;
            out.insert(COMPARE_DATE_RANGE_FIELD, WireValue::String(label));
        }
        QueryType::Blending => {
            let key = compute_blending_query_key(&query.time_dimensions)?;
            let response_key = compute_blending_response_key(&query.time_dimensions)?;
            let value = out.get(response_key.as_str()).cloned().ok_or_else(|| {
                TransformError::MissingBlendingColumn {
                    member: response_key.to_string(),
                }
            })?;
            out.insert(key, value);
        }
    }

    Ok(out)
}
