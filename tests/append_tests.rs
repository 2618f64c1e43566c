mod common;

use common::{assert_invariants, path, rendered, tree};
use serde_json::json;

#[test]
fn plain_append() {
    let mut t = tree(json!({"a": [42], "b": [1]}));
    t.append(&path("a"), &path("b"));

    let expected = r#"
└── b []
    ├── 0	1
    └── 1	42
"#;
    assert_eq!(rendered(&mut t), expected);
    assert_invariants(&t);
}

#[test]
fn destination_elements_come_first() {
    let mut t = tree(json!({
        "src": [{"id": 3}, {"id": 4}],
        "dst": {"items": [{"id": 1}, {"id": 2}]}
    }));
    t.append(&path("src"), &path("dst.items"));

    assert_eq!(
        t.to_json(),
        json!({"dst": {"items": [{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4}]}})
    );
    assert_eq!(t.get(&path("src")), None);
    assert_invariants(&t);
}

#[test]
fn long_collections_keep_numeric_order() {
    let dst: Vec<i64> = (0..11).collect();
    let mut t = tree(json!({"dst": dst, "src": [11, 12]}));
    t.append(&path("src"), &path("dst"));

    let merged: Vec<i64> = (0..13).collect();
    assert_eq!(t.to_json(), json!({ "dst": merged }));
}

#[test]
fn empty_collections_are_collections() {
    let mut t = tree(json!({"a": [1], "b": []}));
    t.append(&path("a"), &path("b"));
    assert_eq!(t.to_json(), json!({"b": [1]}));

    let mut t = tree(json!({"a": [], "b": []}));
    t.append(&path("a"), &path("b"));
    assert_eq!(t.to_json(), json!({"b": []}));
}

#[test]
fn non_collections_are_left_alone() {
    let doc = json!({"a": [1], "b": {"0": 1}, "c": 5});

    let mut t = tree(doc.clone());
    t.append(&path("a"), &path("b"));
    t.append(&path("b"), &path("a"));
    t.append(&path("c"), &path("a"));
    t.append(&path("a"), &path("missing"));
    assert_eq!(t.to_json(), doc);
}

#[test]
fn wildcard_and_nested_paths_are_ignored() {
    let doc = json!({"a": [[1], [2]], "b": [3]});

    let mut t = tree(doc.clone());
    t.append(&path("a.*"), &path("b"));
    t.append(&path("a"), &path("a"));
    t.append(&path("a.0"), &path("a"));
    t.append(&path("a"), &path("a.1"));
    assert_eq!(t.to_json(), doc);
}
