//! Deep merge of selection trees.
//!
//! Lets independent components each declare the fields they need and
//! combine them into a single request:
//!
//! ```
//! use fragments::{merge_fragments, SelectionTree};
//!
//! let a = SelectionTree::new().nested("page", SelectionTree::new().field("_id"));
//! let b = SelectionTree::new().nested("page", SelectionTree::new().field("title"));
//!
//! let merged = merge_fragments([&a, &b]);
//! assert_eq!(merged.to_ql(), "page { _id,title }");
//! ```

use crate::selection::{Selection, SelectionTree};

/// Merge trees left to right into a fresh tree. Inputs are not modified.
pub fn merge_fragments<'a, I>(trees: I) -> SelectionTree
where
    I: IntoIterator<Item = &'a SelectionTree>,
{
    let mut merged = SelectionTree::new();
    for tree in trees {
        merged.merge(tree);
    }
    merged
}

impl SelectionTree {
    /// Merge `other` into `self`.
    ///
    /// Where both sides hold a nested tree the two are merged recursively;
    /// otherwise `other`'s entry replaces `self`'s. Keys already in `self`
    /// keep their position, new keys are appended.
    pub fn merge(&mut self, other: &SelectionTree) {
        for (key, incoming) in other {
            let Some(existing) = self.get_mut(key) else {
                self.insert(key.clone(), incoming.clone());
                continue;
            };
            match (existing, incoming) {
                (Selection::Nested(ours), Selection::Nested(theirs)) => ours.merge(theirs),
                (existing, _) => {
                    if existing.is_field() != incoming.is_field() {
                        tracing::trace!(key = %key, "Later fragment replaces selection shape");
                    }
                    *existing = incoming.clone();
                }
            }
        }
    }
}
