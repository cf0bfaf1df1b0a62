//! Build GraphQL operations from nested field-selection fragments.
//!
//! Describe the data you want as plain trees, merge trees coming from
//! independent components, then compile one `(query, variables)` pair ready
//! to be sent as a request body.

pub mod compile;
pub mod error;
pub mod fragment;
pub mod merge;
pub mod render;
pub mod selection;
pub mod variables;

// Re-export key types at crate root for convenience.
pub use compile::{
    build_query, build_query_and_variables, CompiledQuery, OperationType, QueryCompiler,
};
pub use error::FragmentError;
pub use fragment::Fragment;
#[cfg(feature = "derive")]
pub use fragments_derive::Fragment;
pub use merge::merge_fragments;
pub use render::fragment_to_ql;
pub use selection::{Selection, SelectionTree};
pub use variables::{VariableNode, VariableSpec, VariableTree};
