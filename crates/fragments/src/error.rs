//! Error types for fragment ingest.
//!
//! Compiling, rendering and merging never fail. [`FragmentError`] only
//! covers turning loosely-shaped JSON (or JSON text) into the typed
//! [`SelectionTree`](crate::SelectionTree) and
//! [`VariableTree`](crate::VariableTree) representations.

use thiserror::Error;

/// Errors that can occur when building fragment trees from JSON.
#[derive(Debug, Error)]
pub enum FragmentError {
    /// The root of a selection or variable tree must be a JSON object.
    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    /// A selection entry is `null` or an array.
    #[error("Invalid selection at '{path}': {reason}")]
    InvalidSelection { path: String, reason: String },
    /// The operation keyword is not `query`, `mutation` or `subscription`.
    #[error("Unknown operation type: {0}")]
    UnknownOperation(String),
    /// The input text is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Human-readable name of a JSON value's kind, for error messages.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
