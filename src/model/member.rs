//! Member paths.
//!
//! A member path names a measure or dimension as `cube.field`. Time dimensions
//! requested at a specific granularity carry a third segment:
//! `cube.field.granularity`.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Separator between member path segments.
pub const MEMBER_SEPARATOR: char = '.';

/// Dot-separated semantic member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberPath(String);

impl MemberPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(MEMBER_SEPARATOR)
    }

    /// Granularity segment of a `cube.field.granularity` path.
    pub fn granularity(&self) -> Option<&str> {
        let mut segments = self.segments();
        match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(_), Some(granularity), None) => Some(granularity),
            _ => None,
        }
    }

    /// The same logical dimension without its granularity segment.
    ///
    /// Only three-segment paths have one; every other shape returns `None`.
    pub fn without_granularity(&self) -> Option<MemberPath> {
        self.granularity()?;
        let mut segments = self.segments();
        let cube = segments.next()?;
        let field = segments.next()?;
        Some(MemberPath(format!("{cube}{MEMBER_SEPARATOR}{field}")))
    }

    /// Append a granularity segment.
    pub fn with_granularity(&self, granularity: &str) -> MemberPath {
        MemberPath(format!("{}{}{}", self.0, MEMBER_SEPARATOR, granularity))
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MemberPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MemberPath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MemberPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}
