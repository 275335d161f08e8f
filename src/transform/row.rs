//! Ordered rows.
//!
//! Column order matters on both sides: the first driver row fixes the member
//! order of a Compact response, and Vanilla objects list keys in insertion
//! order. Both row types are small vectors of pairs; lookups are linear.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::value::{RawValue, WireValue};

/// One driver row, keyed by SQL alias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DbRow {
    columns: Vec<(String, RawValue)>,
}

impl DbRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`DbRow::insert`].
    pub fn with(mut self, alias: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(alias, value);
        self
    }

    /// Set a column, keeping its original position if it already exists.
    pub fn insert(&mut self, alias: impl Into<String>, value: impl Into<RawValue>) {
        let alias = alias.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(a, _)| *a == alias) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((alias, value)),
        }
    }

    pub fn get(&self, alias: &str) -> Option<&RawValue> {
        self.columns.iter().find(|(a, _)| a == alias).map(|(_, v)| v)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(a, _)| a.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.columns.iter().map(|(a, v)| (a.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for DbRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = DbRow::new();
        for (alias, value) in iter {
            row.insert(alias, value);
        }
        row
    }
}

impl<'de> Deserialize<'de> for DbRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DbRowVisitor;

        impl<'de> Visitor<'de> for DbRowVisitor {
            type Value = DbRow;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of column values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DbRow, A::Error> {
                let mut row = DbRow {
                    columns: Vec::with_capacity(map.size_hint().unwrap_or(0)),
                };
                while let Some((alias, value)) = map.next_entry::<String, RawValue>()? {
                    row.insert(alias, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(DbRowVisitor)
    }
}

/// One Vanilla response row, keyed by member name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VanillaRow {
    entries: Vec<(String, WireValue)>,
}

impl VanillaRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Set a key, keeping its original position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: WireValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WireValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for VanillaRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
