mod common;

use common::{assert_invariants, path, rendered, tree};
use serde_json::json;

fn deleted(pattern: &str, doc: serde_json::Value) -> String {
    let mut t = tree(doc);
    t.sort();
    t.del(&path(pattern));
    assert_invariants(&t);
    rendered(&mut t)
}

#[test]
fn unknown_path_is_noop() {
    let out = deleted("abc", json!({"sonic": 42, "turbo": false}));
    assert_eq!(out, "\n├── sonic\t42\n└── turbo\tfalse\n");
}

#[test]
fn empty_containers_survive_wildcard_delete() {
    let out = deleted("data.*.password", json!({"data": []}));
    assert_eq!(out, "\n└── data\t[]\n");

    let out = deleted("data.*.password", json!({"data": {}}));
    assert_eq!(out, "\n└── data\t{}\n");
}

#[test]
fn empty_list_export_is_preserved() {
    let mut t = tree(json!({"a": []}));
    t.del(&path("a.*.password"));
    assert_eq!(t.to_json(), json!({"a": []}));
}

#[test]
fn plain_and_nested_keys() {
    let out = deleted("sonic", json!({"sonic": 42, "turbo": false}));
    assert_eq!(out, "\n└── turbo\tfalse\n");

    let out = deleted(
        "internal.sonic",
        json!({"internal": {"sonic": 42, "turbo": false}, "turbo": false}),
    );
    let expected = r#"
├── internal
│   └── turbo	false
└── turbo	false
"#;
    assert_eq!(out, expected);

    let out = deleted(
        "internal",
        json!({"internal": {"sonic": 42, "turbo": false}, "turbo": false}),
    );
    assert_eq!(out, "\n└── turbo\tfalse\n");
}

#[test]
fn similar_names_are_not_confused() {
    let out = deleted(
        "a.a.a",
        json!({"a": {"a": {"a": {"a": 1}, "aa": 1}, "aa": 1}, "turbo": false}),
    );
    let expected = r#"
├── a
│   ├── a
│   │   └── aa	1
│   └── aa	1
└── turbo	false
"#;
    assert_eq!(out, expected);
}

#[test]
fn wildcard_over_map_children() {
    let out = deleted(
        "a.*.sonic",
        json!({
            "a": {
                "first": {"sonic": 42, "turbo": false},
                "last": {"sonic": 42, "turbo": false}
            },
            "turbo": false
        }),
    );
    let expected = r#"
├── a
│   ├── first
│   │   └── turbo	false
│   └── last
│       └── turbo	false
└── turbo	false
"#;
    assert_eq!(out, expected);
}

#[test]
fn nested_collection_element_attributes() {
    let out = deleted(
        "a.*.b.*.c",
        json!({
            "a": [
                {"b": [{"c": {"a": 1}, "aa": 1}, {"c": {"a": 2}, "aa": 1}], "aa": 1},
                {"b": [{"c": {"a": 1}, "aa": 1}], "aa": 1}
            ],
            "turbo": false
        }),
    );
    let expected = r#"
├── a []
│   ├── 0
│   │   ├── aa	1
│   │   └── b []
│   │       ├── 0
│   │       │   └── aa	1
│   │       └── 1
│   │           └── aa	1
│   └── 1
│       ├── aa	1
│       └── b []
│           └── 0
│               └── aa	1
└── turbo	false
"#;
    assert_eq!(out, expected);
}

#[test]
fn large_collection_keeps_numeric_order() {
    let items: Vec<serde_json::Value> = (0..12).map(|i| json!({"a": i % 2 + 1, "aa": 1})).collect();
    let out = deleted("a.*.a", json!({"a": items, "turbo": false}));

    let mut expected = String::from("\n├── a []\n");
    for i in 0..12 {
        if i == 11 {
            expected.push_str(&format!("│   └── {i}\n│       └── aa\t1\n"));
        } else {
            expected.push_str(&format!("│   ├── {i}\n│   │   └── aa\t1\n"));
        }
    }
    expected.push_str("└── turbo\tfalse\n");
    assert_eq!(out, expected);
}

#[test]
fn trailing_wildcard_clears_children() {
    let mut t = tree(json!({"a": [1, 2, 3], "b": {"x": 1, "y": 2}}));
    t.del(&path("a.*"));
    t.del(&path("b.*"));
    assert_eq!(t.to_json(), json!({"a": [], "b": {}}));
}

#[test]
fn delete_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let doc = json!({"a": [{"p": 1, "q": 2}, {"p": 3}], "b": 1});

    let mut once = tree(doc.clone());
    once.del(&path("a.*.p"));

    let mut twice = tree(doc);
    twice.del(&path("a.*.p"));
    twice.del(&path("a.*.p"));

    assert_eq!(once.to_json(), twice.to_json());
    assert_eq!(once.fingerprint(), twice.fingerprint());
    Ok(())
}

#[test]
fn deleting_list_element_compacts_export() {
    let mut t = tree(json!({"a": ["x", "y", "z"]}));
    t.del(&path("a.1"));
    assert_eq!(t.to_json(), json!({"a": ["x", "z"]}));
}

#[test]
fn empty_pattern_is_noop() {
    let mut t = tree(json!({"a": 1}));
    t.del::<&str>(&[]);
    assert_eq!(t.to_json(), json!({"a": 1}));
}
