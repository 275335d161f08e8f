//! Member annotations.
//!
//! The annotation map is the visibility list for a query: a member with an
//! entry may be returned to the client, a member without one may not. The
//! entry's semantic type also drives value coercion and filter casting.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::member::MemberPath;

/// Annotation map keyed by member path.
pub type Annotation = HashMap<MemberPath, MemberAnnotation>;

/// SQL column alias to member path, as chosen by the query assembler.
pub type AliasToMemberMap = HashMap<String, MemberPath>;

/// Declared semantic type of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Time,
    Number,
    Boolean,
    String,
    /// Any type this crate has no special handling for (`geo`, `count`, ...).
    #[serde(other)]
    Other,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Time => "time",
            SemanticType::Number => "number",
            SemanticType::Boolean => "boolean",
            SemanticType::String => "string",
            SemanticType::Other => "other",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display and type metadata for one visible member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAnnotation {
    #[serde(rename = "type")]
    pub member_type: SemanticType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl MemberAnnotation {
    /// Annotation with only a type.
    pub fn of(member_type: SemanticType) -> Self {
        Self {
            member_type,
            title: None,
            short_title: None,
            description: None,
            format: None,
            meta: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
