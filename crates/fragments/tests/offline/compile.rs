use super::*;
use fragments::{build_query, build_query_and_variables, OperationType, QueryCompiler};
use serde_json::json;

// ── Without variables ───────────────────────────────────────────────────────

#[test]
fn simple_query_without_variables() {
    let compiled = build_query(&selections(json!({ "page": { "_id": 1, "title": 1 } })));
    assert_eq!(compiled.query, "query { page { _id,title } }");
    assert!(compiled.variables.is_empty());
}

#[test]
fn scoped_fragments_without_variables() {
    let compiled = build_query(&selections(json!({
        "page": { "_id": 1, "title": 1 },
        "another: page": { "_id": 1, "title": 1, "date": 1 }
    })));
    assert_eq!(
        compiled.query,
        "query { page { _id,title },another: page { _id,title,date } }"
    );
    assert!(compiled.variables.is_empty());
}

#[test]
fn empty_selections() {
    let compiled = build_query(&selections(json!({})));
    assert_eq!(compiled.query, "query {  }");
}

// ── With variables ──────────────────────────────────────────────────────────

#[test]
fn simple_query_with_variables() {
    let compiled = QueryCompiler::new().compile(
        &selections(json!({ "page": { "_id": 1, "title": 1 } })),
        &variables(json!({ "page": { "_id": { "value": "1", "type": "ID!" } } })),
    );
    assert_eq!(
        serde_json::to_value(&compiled).unwrap(),
        json!({
            "query": "query ($_id0: ID!) { page (_id: $_id0) { _id,title } }",
            "variables": { "_id0": "1" }
        })
    );
}

#[test]
fn simple_mutation_with_variables() {
    let compiled = build_query_and_variables(
        &selections(json!({ "page": { "_id": 1, "title": 1 } })),
        &variables(json!({ "page": { "_id": { "value": "1", "type": "ID!" } } })),
        OperationType::Mutation,
    );
    assert_eq!(
        compiled.query,
        "mutation ($_id0: ID!) { page (_id: $_id0) { _id,title } }"
    );
    assert_eq!(compiled.variables["_id0"], "1");
}

#[test]
fn complex_query_with_variables() {
    let compiled = QueryCompiler::new().compile(
        &selections(json!({
            "page": { "_id": 1, "title": 1 },
            "pages": { "_id": 1, "date": 1 },
            "pagesCount": 1
        })),
        &variables(json!({ "page": { "_id": { "value": "1", "type": "ID!" } } })),
    );
    assert_eq!(
        compiled.query,
        "query ($_id0: ID!) { page (_id: $_id0) { _id,title },pages { _id,date },pagesCount }"
    );
    assert_eq!(compiled.variables.len(), 1);
}

#[test]
fn nested_queries_with_variables() {
    let compiled = QueryCompiler::new().compile(
        &selections(json!({
            "page": {
                "_id": 1,
                "title": 1,
                "revisions": { "_id": 1, "date": 1 }
            },
            "pages": { "_id": 1, "date": 1, "count": 1 },
            "pagesCount": 1
        })),
        &variables(json!({
            "page": {
                "_id": { "value": "1", "type": "ID!" },
                "revisions": {
                    "date": { "value": "2", "type": "String!" }
                }
            },
            "pages": {
                "count": {
                    "date": { "value": "3", "type": "String!" }
                }
            }
        })),
    );
    assert_eq!(
        compiled.query,
        "query ($_id0: ID!,$date1: String!,$date2: String!) { \
         page (_id: $_id0) { _id,title,revisions (date: $date1) { _id,date } },\
         pages { _id,date,count (date: $date2) },\
         pagesCount }"
    );
    assert_eq!(
        serde_json::to_value(&compiled.variables).unwrap(),
        json!({ "_id0": "1", "date1": "2", "date2": "3" })
    );
}

#[test]
fn scoped_fragments_with_variables() {
    let compiled = QueryCompiler::new().compile(
        &selections(json!({
            "page": { "_id": 1, "title": 1 },
            "another: page": { "_id": 1, "title": 1, "date": 1 }
        })),
        &variables(json!({
            "page": { "_id": { "value": "1", "type": "ID!" } },
            "another: page": { "_id": { "value": "2", "type": "ID!" } }
        })),
    );
    assert_eq!(
        compiled.query,
        "query ($_id0: ID!,$_id1: ID!) { page (_id: $_id0) { _id,title },\
         another: page (_id: $_id1) { _id,title,date } }"
    );
    assert_eq!(compiled.variables["_id0"], "1");
    assert_eq!(compiled.variables["_id1"], "2");
}

#[test]
fn binding_two_levels_deep_stays_on_that_field() {
    let compiled = QueryCompiler::new().compile(
        &selections(json!({
            "page": { "createdBy": { "posts": { "title": 1 } } }
        })),
        &variables(json!({
            "page": { "createdBy": { "posts": {
                "first": { "value": 10, "type": "Int" }
            } } }
        })),
    );
    assert_eq!(
        compiled.query,
        "query ($first0: Int) { page { createdBy { posts (first: $first0) { title } } } }"
    );
    assert_eq!(compiled.variables["first0"], 10);
}

#[test]
fn several_arguments_on_one_field() {
    let compiled = QueryCompiler::new().compile(
        &selections(json!({ "pages": { "_id": 1 } })),
        &variables(json!({ "pages": {
            "first": { "value": 5, "type": "Int" },
            "filter": { "value": { "published": true }, "type": "PageFilter" }
        } })),
    );
    assert_eq!(
        compiled.query,
        "query ($first0: Int,$filter1: PageFilter) { pages (first: $first0,filter: $filter1) { _id } }"
    );
    assert_eq!(compiled.variables["filter1"], json!({ "published": true }));
}

#[test]
fn subscription_keyword() {
    let compiled = QueryCompiler::new()
        .operation(OperationType::Subscription)
        .compile(
            &selections(json!({ "pageUpdated": { "_id": 1 } })),
            &VariableTree::new(),
        );
    assert_eq!(compiled.query, "subscription { pageUpdated { _id } }");
}

// ── Degenerate input ────────────────────────────────────────────────────────

#[test]
fn malformed_spec_is_treated_as_nested_and_dropped() {
    // `type` is not text and `slug` lacks `type`: neither becomes an argument.
    let compiled = QueryCompiler::new().compile(
        &selections(json!({ "page": { "_id": 1, "slug": 1 } })),
        &variables(json!({ "page": {
            "_id": { "value": "1", "type": 3 },
            "slug": { "value": "landing" }
        } })),
    );
    assert_eq!(compiled.query, "query { page { _id,slug } }");
    assert!(compiled.variables.is_empty());
}

#[test]
fn unmatched_variable_keys_are_ignored() {
    let compiled = QueryCompiler::new().compile(
        &selections(json!({ "page": { "_id": 1 } })),
        &variables(json!({
            "page": { "missing": { "nested": { "value": 1, "type": "Int" } } },
            "pages": { "_id": { "value": "1", "type": "ID!" } }
        })),
    );
    assert_eq!(compiled.query, "query { page { _id } }");
    assert!(compiled.variables.is_empty());
}

#[test]
fn independent_compiles_are_identical() {
    let sel = selections(json!({
        "page": { "_id": 1 },
        "another: page": { "_id": 1 }
    }));
    let vars = variables(json!({
        "page": { "_id": { "value": "1", "type": "ID!" } },
        "another: page": { "_id": { "value": "2", "type": "ID!" } }
    }));
    let first = QueryCompiler::new().compile(&sel, &vars);
    let second = QueryCompiler::new().compile(&sel, &vars);
    assert_eq!(first, second);
    assert_eq!(
        first.variables.keys().collect::<Vec<_>>(),
        ["_id0", "_id1"]
    );
}
