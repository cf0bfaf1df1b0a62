//! Variable specification trees.
//!
//! A [`VariableTree`] runs parallel to a [`SelectionTree`](crate::SelectionTree).
//! The entry for a selection key is a [`VariableNode::Node`] whose leaves are
//! that selection's arguments and whose nested nodes carry arguments for its
//! children:
//!
//! ```text
//! selections: { page: { _id: 1, revisions: { date: 1 } } }
//! variables:  { page: { _id: Leaf, revisions: { date: Leaf } } }
//!          => page (_id: $_id0) { _id,revisions (date: $date1) { date } }
//! ```
//!
//! JSON input is classified once, up front: an object holding both `value`
//! and a string `type` is a [`VariableNode::Leaf`], any other object is a
//! [`VariableNode::Node`]. Non-object entries are dropped.

use crate::error::{kind_of, FragmentError};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// A value to bind plus the GraphQL type it is declared with (e.g. `ID!`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub value: Value,
    #[serde(rename = "type")]
    pub type_decl: String,
}

impl VariableSpec {
    pub fn new(value: impl Into<Value>, type_decl: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            type_decl: type_decl.into(),
        }
    }
}

/// One entry of a [`VariableTree`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VariableNode {
    /// An argument bound on the enclosing selection.
    Leaf(VariableSpec),
    /// Arguments for the selection of the same key, and for its children.
    Node(VariableTree),
}

impl VariableNode {
    pub fn as_spec(&self) -> Option<&VariableSpec> {
        match self {
            Self::Leaf(spec) => Some(spec),
            Self::Node(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&VariableTree> {
        match self {
            Self::Leaf(_) => None,
            Self::Node(tree) => Some(tree),
        }
    }
}

/// An ordered tree of variable specifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VariableTree {
    entries: IndexMap<String, VariableNode>,
}

impl VariableTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an argument named `key` on the enclosing selection.
    pub fn bind(mut self, key: impl Into<String>, spec: VariableSpec) -> Self {
        self.entries.insert(key.into(), VariableNode::Leaf(spec));
        self
    }

    /// Attach arguments to the selection named `key`.
    pub fn nested(mut self, key: impl Into<String>, tree: VariableTree) -> Self {
        self.entries.insert(key.into(), VariableNode::Node(tree));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, node: VariableNode) -> Option<VariableNode> {
        self.entries.insert(key.into(), node)
    }

    pub fn get(&self, key: &str) -> Option<&VariableNode> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, VariableNode> {
        self.entries.iter()
    }

    /// Classify a loosely-shaped JSON object into a typed tree.
    ///
    /// Never fails: entries that are not objects are dropped, and objects
    /// missing `value` or a string `type` are treated as nested nodes.
    pub fn classify(map: Map<String, Value>) -> Self {
        let mut tree = Self::new();
        for (key, value) in map {
            match value {
                Value::Object(inner) => {
                    tree.entries.insert(key, classify_node(inner));
                }
                other => {
                    tracing::debug!(
                        key = %key,
                        found = kind_of(&other),
                        "Dropping non-object variable entry"
                    );
                }
            }
        }
        tree
    }
}

fn classify_node(mut map: Map<String, Value>) -> VariableNode {
    let is_leaf = map.contains_key("value") && map.get("type").is_some_and(Value::is_string);
    if !is_leaf {
        return VariableNode::Node(VariableTree::classify(map));
    }
    let value = map.remove("value").unwrap_or_default();
    let type_decl = match map.remove("type") {
        Some(Value::String(s)) => s,
        _ => String::new(),
    };
    VariableNode::Leaf(VariableSpec { value, type_decl })
}

impl TryFrom<Value> for VariableTree {
    type Error = FragmentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::classify(map)),
            other => Err(FragmentError::NotAnObject {
                found: kind_of(&other),
            }),
        }
    }
}

impl FromStr for VariableTree {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        Self::try_from(value)
    }
}

impl<'de> Deserialize<'de> for VariableTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a VariableTree {
    type Item = (&'a String, &'a VariableNode);
    type IntoIter = indexmap::map::Iter<'a, String, VariableNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
