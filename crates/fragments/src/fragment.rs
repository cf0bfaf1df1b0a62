//! Type-driven fragments.
//!
//! Each type that implements [`Fragment`] knows its own selection tree, so
//! components can declare the data they need as Rust types and merge them
//! before compiling one request. The struct shape *is* the fragment shape.

use crate::selection::SelectionTree;

/// Trait implemented by types that know their field selection.
///
/// Usually derived:
///
/// ```ignore
/// use fragments::Fragment;
///
/// #[derive(Fragment)]
/// struct Page {
///     _id: String,
///     title: String,
///     #[fragment(nested)]
///     created_by: Option<User>,
/// }
///
/// #[derive(Fragment)]
/// struct User {
///     name: String,
/// }
///
/// assert_eq!(Page::selection(), "_id,title,createdBy { name }");
/// ```
pub trait Fragment {
    /// The selection tree for this type.
    fn fragment() -> SelectionTree;

    /// The selection rendered as GraphQL text.
    fn selection() -> String {
        Self::fragment().to_ql()
    }
}
