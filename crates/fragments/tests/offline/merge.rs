use super::*;
use fragments::merge_fragments;
use serde_json::json;

// ── merge_fragments ─────────────────────────────────────────────────────────

#[test]
fn merges_component_fragments() {
    let a = selections(json!({
        "page": { "_id": 1, "name": 1, "createdBy": { "_id": 1 } },
        "pages": { "_id": 1 },
        "pagesCount": 1
    }));
    let b = selections(json!({
        "page": { "title": 1, "createdBy": { "name": 1 } },
        "pages": { "title": 1, "date": 1, "author": { "_id": 1 } }
    }));

    let merged = merge_fragments([&a, &b]);
    assert_eq!(
        serde_json::to_value(&merged).unwrap(),
        json!({
            "page": {
                "_id": 1,
                "name": 1,
                "createdBy": { "_id": 1, "name": 1 },
                "title": 1
            },
            "pages": {
                "_id": 1,
                "title": 1,
                "date": 1,
                "author": { "_id": 1 }
            },
            "pagesCount": 1
        })
    );
}

#[test]
fn merges_three_fragments_left_to_right() {
    let a = selections(json!({ "page": { "_id": 1 } }));
    let b = selections(json!({ "page": { "title": 1 } }));
    let c = selections(json!({ "page": 1, "session": { "email": 1 } }));

    let merged = merge_fragments([&a, &b, &c]);
    assert_eq!(merged.to_ql(), "page,session { email }");

    let merged = merge_fragments([&c, &a, &b]);
    assert_eq!(merged.to_ql(), "page { _id,title },session { email }");
}

#[test]
fn merge_in_place_extends_tree() {
    let mut base = selections(json!({ "session": { "_id": 1 } }));
    base.merge(&selections(json!({ "session": { "email": 1 }, "page": { "_id": 1 } })));
    assert_eq!(base.to_ql(), "session { _id,email },page { _id }");
}

#[test]
fn merged_fragments_compile() {
    let header = selections(json!({ "session": { "_id": 1 } }));
    let body = selections(json!({ "page": { "slug": 1 }, "session": { "email": 1 } }));
    let merged = merge_fragments([&header, &body]);

    let compiled = fragments::build_query(&merged);
    assert_eq!(
        compiled.query,
        "query { session { _id,email },page { slug } }"
    );
}
