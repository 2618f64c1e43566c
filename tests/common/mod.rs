#![allow(dead_code)]

use flatex::Tree;
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("flatex=debug".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

pub fn tree(json: serde_json::Value) -> Tree {
    Tree::from_json(json).expect("fixture must not be null")
}

pub fn path(p: &str) -> Vec<String> {
    flatex::path::split(p, ".")
}

/// Sorted rendering with a leading newline so expectations can be written
/// as indented raw strings.
pub fn rendered(tree: &mut Tree) -> String {
    tree.sort();
    format!("\n{}", tree)
}

/// Every child sits exactly one level below its parent and sibling labels
/// are unique.
pub fn assert_invariants(tree: &Tree) {
    let mut stack = vec![tree.root()];
    assert_eq!(tree.node(tree.root()).map(|n| n.depth), Some(0));
    while let Some(id) = stack.pop() {
        let node = tree.node(id).expect("reachable node");
        let mut labels: Vec<&str> = node.edges.iter().map(|e| e.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), node.edges.len(), "duplicate labels");
        for e in &node.edges {
            let child = tree.node(e.child).expect("child node");
            assert_eq!(child.depth, node.depth + 1, "depth of edge {}", e.label);
            stack.push(e.child);
        }
    }
}
