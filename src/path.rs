use crate::node::NodeId;
use crate::tree::Tree;

pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub node: NodeId,
    pub path: Vec<String>,
}

impl Match {
    pub fn bindings<S: AsRef<str>>(&self, pattern: &[S]) -> Vec<String> {
        pattern
            .iter()
            .zip(&self.path)
            .filter(|(seg, _)| seg.as_ref() == WILDCARD)
            .map(|(_, label)| label.clone())
            .collect()
    }
}

pub fn is_pattern<S: AsRef<str>>(path: &[S]) -> bool {
    path.iter().any(|s| s.as_ref() == WILDCARD)
}

pub fn split(path: &str, sep: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(sep).map(str::to_string).collect()
}

impl Tree {
    pub fn resolve<S: AsRef<str>>(&self, pattern: &[S]) -> Vec<Match> {
        self.resolve_from(self.root, pattern)
    }

    pub(crate) fn resolve_from<S: AsRef<str>>(&self, start: NodeId, pattern: &[S]) -> Vec<Match> {
        let mut frontier = vec![Match {
            node: start,
            path: Vec::new(),
        }];

        for seg in pattern {
            let seg = seg.as_ref();
            let mut next = Vec::new();
            for m in &frontier {
                let node = &self.nodes[m.node];
                if seg == WILDCARD {
                    for e in &node.edges {
                        next.push(m.step(&e.label, e.child));
                    }
                } else if let Some(e) = node.edge(seg) {
                    next.push(m.step(&e.label, e.child));
                }
            }
            if next.is_empty() {
                return next;
            }
            frontier = next;
        }

        frontier
    }
}

impl Match {
    fn step(&self, label: &str, node: NodeId) -> Match {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(label.to_string());
        Match { node, path }
    }
}
