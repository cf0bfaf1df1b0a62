//! Field-selection trees.
//!
//! A [`SelectionTree`] is an ordered mapping from selection key to either
//! the inclusion marker ([`Selection::Field`]) or a nested tree. Keys are
//! opaque labels: `"alias: field"` is emitted verbatim, never parsed.
//!
//! Trees can be built in code with the builder methods or ingested from
//! JSON, where objects are nested trees and any other scalar (canonically
//! `1`) is a marker. Only `null` and arrays are rejected.

use crate::error::{kind_of, FragmentError};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

/// One entry of a [`SelectionTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Include the field as-is.
    Field,
    /// Include the field with a nested selection set.
    Nested(SelectionTree),
}

impl Selection {
    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field)
    }

    /// The nested tree, if this entry has one.
    pub fn as_tree(&self) -> Option<&SelectionTree> {
        match self {
            Self::Field => None,
            Self::Nested(tree) => Some(tree),
        }
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Field => serializer.serialize_u8(1),
            Self::Nested(tree) => tree.serialize(serializer),
        }
    }
}

/// An ordered field-selection tree ("fragment").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionTree {
    entries: IndexMap<String, Selection>,
}

impl SelectionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain field. Replaces any existing entry under `key` in place.
    pub fn field(mut self, key: impl Into<String>) -> Self {
        self.entries.insert(key.into(), Selection::Field);
        self
    }

    /// Add a field with a nested selection set.
    pub fn nested(mut self, key: impl Into<String>, tree: SelectionTree) -> Self {
        self.entries.insert(key.into(), Selection::Nested(tree));
        self
    }

    /// Insert an entry, returning the one it replaced. An existing key keeps
    /// its position.
    pub fn insert(&mut self, key: impl Into<String>, selection: Selection) -> Option<Selection> {
        self.entries.insert(key.into(), selection)
    }

    pub fn get(&self, key: &str) -> Option<&Selection> {
        self.entries.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Selection> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Selection> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Selection> {
        self.entries.keys()
    }

    fn from_object(map: serde_json::Map<String, Value>, prefix: &str) -> Result<Self, FragmentError> {
        let mut tree = Self::new();
        for (key, value) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            let selection = match value {
                Value::Object(inner) => Selection::Nested(Self::from_object(inner, &path)?),
                Value::Array(_) => {
                    return Err(FragmentError::InvalidSelection {
                        path,
                        reason: "arrays are not selections".to_string(),
                    });
                }
                Value::Null => {
                    return Err(FragmentError::InvalidSelection {
                        path,
                        reason: "null is not an inclusion marker".to_string(),
                    });
                }
                Value::Bool(_) | Value::Number(_) | Value::String(_) => Selection::Field,
            };
            tree.entries.insert(key, selection);
        }
        Ok(tree)
    }
}

impl TryFrom<Value> for SelectionTree {
    type Error = FragmentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::from_object(map, ""),
            other => Err(FragmentError::NotAnObject {
                found: kind_of(&other),
            }),
        }
    }
}

impl FromStr for SelectionTree {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        Self::try_from(value)
    }
}

impl<'de> Deserialize<'de> for SelectionTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl<K: Into<String>> FromIterator<(K, Selection)> for SelectionTree {
    fn from_iter<I: IntoIterator<Item = (K, Selection)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SelectionTree {
    type Item = (&'a String, &'a Selection);
    type IntoIter = indexmap::map::Iter<'a, String, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
