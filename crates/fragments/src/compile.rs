//! Query compilation.
//!
//! [`QueryCompiler`] walks a selection tree and its parallel
//! [`VariableTree`] together, producing one operation document and the flat
//! variables map that goes with it.
//!
//! Every bound argument gets a document-wide unique variable name: the
//! argument key suffixed with a counter that increments once per variable,
//! in traversal order. All declarations are hoisted into the operation
//! header.
//!
//! # Example
//!
//! ```
//! use fragments::{QueryCompiler, SelectionTree, VariableSpec, VariableTree};
//!
//! let selections = SelectionTree::new()
//!     .nested("page", SelectionTree::new().field("_id").field("title"));
//! let variables = VariableTree::new()
//!     .nested("page", VariableTree::new().bind("_id", VariableSpec::new("1", "ID!")));
//!
//! let compiled = QueryCompiler::new().compile(&selections, &variables);
//! assert_eq!(
//!     compiled.query,
//!     "query ($_id0: ID!) { page (_id: $_id0) { _id,title } }"
//! );
//! assert_eq!(compiled.variables["_id0"], "1");
//! ```

use crate::error::FragmentError;
use crate::selection::{Selection, SelectionTree};
use crate::variables::{VariableNode, VariableSpec, VariableTree};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The operation keyword that opens the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    #[default]
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(Self::Query),
            "mutation" => Ok(Self::Mutation),
            "subscription" => Ok(Self::Subscription),
            other => Err(FragmentError::UnknownOperation(other.to_string())),
        }
    }
}

/// A compiled operation, shaped like a GraphQL request body.
///
/// `serde_json::to_value(&compiled)` gives `{ "query": ..., "variables": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledQuery {
    pub query: String,
    pub variables: IndexMap<String, Value>,
}

/// Compiles selection trees into operation documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryCompiler {
    operation: OperationType,
}

impl QueryCompiler {
    /// A compiler emitting `query` operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operation keyword.
    pub fn operation(mut self, operation: OperationType) -> Self {
        self.operation = operation;
        self
    }

    /// Compile `selections` into a document, binding arguments from `variables`.
    ///
    /// Each top-level key is an operation field whose arguments come from the
    /// variable entry of the same key. Variable entries with no matching
    /// selection are ignored. Never fails.
    ///
    /// Variable names are `key + counter` unless that name is already taken,
    /// in which case the counter advances until it is free.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(operation = %self.operation, selections = selections.len())
    )]
    pub fn compile(&self, selections: &SelectionTree, variables: &VariableTree) -> CompiledQuery {
        let mut ctx = CompileContext::default();
        let body = ctx.render(selections, Some(variables));

        let query = if ctx.declarations.is_empty() {
            format!("{} {{ {} }}", self.operation, body)
        } else {
            format!(
                "{} ({}) {{ {} }}",
                self.operation,
                ctx.declarations.join(","),
                body
            )
        };

        tracing::debug!(
            declarations = ctx.declarations.len(),
            query_len = query.len(),
            "Compiled operation"
        );

        CompiledQuery {
            query,
            variables: ctx.variables,
        }
    }
}

/// Compile a `query` with no variables.
pub fn build_query(selections: &SelectionTree) -> CompiledQuery {
    QueryCompiler::new().compile(selections, &VariableTree::new())
}

/// Compile an operation of the given type, binding arguments from `variables`.
pub fn build_query_and_variables(
    selections: &SelectionTree,
    variables: &VariableTree,
    operation: OperationType,
) -> CompiledQuery {
    QueryCompiler::new()
        .operation(operation)
        .compile(selections, variables)
}

/// Traversal state for a single compile call.
#[derive(Default)]
struct CompileContext {
    counter: usize,
    declarations: Vec<String>,
    variables: IndexMap<String, Value>,
}

impl CompileContext {
    fn render(&mut self, tree: &SelectionTree, variables: Option<&VariableTree>) -> String {
        let mut parts = Vec::with_capacity(tree.len());

        for (key, selection) in tree {
            let scoped = variables
                .and_then(|v| v.get(key))
                .and_then(VariableNode::as_tree);

            let mut arguments = Vec::new();
            if let Some(scoped) = scoped {
                for (argument, node) in scoped {
                    if let VariableNode::Leaf(spec) = node {
                        arguments.push(self.bind(argument, spec));
                    }
                }
            }

            let mut part = key.clone();
            if !arguments.is_empty() {
                part.push_str(&format!(" ({})", arguments.join(",")));
            }
            if let Selection::Nested(children) = selection {
                let inner = self.render(children, scoped);
                part.push_str(&format!(" {{ {} }}", inner));
            }
            parts.push(part);
        }

        parts.join(",")
    }

    /// Declare a fresh variable for `argument` and return its `argument: $name` binding.
    fn bind(&mut self, argument: &str, spec: &VariableSpec) -> String {
        let mut name = format!("{}{}", argument, self.counter);
        // A key ending in digits can collide with an earlier name ("a1" + 0 vs "a" + 10).
        while self.variables.contains_key(&name) {
            self.counter += 1;
            name = format!("{}{}", argument, self.counter);
        }
        self.counter += 1;

        tracing::trace!(
            name = %name,
            argument = %argument,
            type_decl = %spec.type_decl,
            "Bound variable"
        );

        self.declarations.push(format!("${}: {}", name, spec.type_decl));
        self.variables.insert(name.clone(), spec.value.clone());
        format!("{}: ${}", argument, name)
    }
}
