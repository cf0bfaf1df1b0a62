//! Selection-set rendering.
//!
//! Turns a [`SelectionTree`] into GraphQL selection syntax: siblings joined
//! by `,`, nested trees wrapped as `key { ... }`.

use crate::selection::{Selection, SelectionTree};
use std::fmt;

/// Render a selection tree without variables.
///
/// `{ _id: 1, createdBy: { _id: 1 } }` renders as `_id,createdBy { _id }`.
/// An empty tree renders as the empty string.
pub fn fragment_to_ql(tree: &SelectionTree) -> String {
    tree.iter()
        .map(|(key, selection)| match selection {
            Selection::Field => key.clone(),
            Selection::Nested(nested) => format!("{} {{ {} }}", key, fragment_to_ql(nested)),
        })
        .collect::<Vec<_>>()
        .join(",")
}

impl SelectionTree {
    /// Shorthand for [`fragment_to_ql`].
    pub fn to_ql(&self) -> String {
        fragment_to_ql(self)
    }
}

impl fmt::Display for SelectionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fragment_to_ql(self))
    }
}
