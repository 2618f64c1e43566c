use crate::error::FlatexError;
use crate::node::{Edge, Node, NodeId};
use crate::ordering::compare_labels;
use crate::path::is_pattern;
use crate::value::Value;
use std::collections::BTreeMap;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct Tree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) free: Vec<NodeId>,
    pub(crate) root: NodeId,
}

impl Tree {
    pub fn new(value: Option<Value>) -> Result<Self, FlatexError> {
        let value = value.ok_or(FlatexError::EmptyInput)?;

        let mut tree = Self {
            nodes: vec![Node::new(0)],
            free: Vec::new(),
            root: 0,
        };
        tree.build(tree.root, value);
        Ok(tree)
    }

    pub fn from_json(json: serde_json::Value) -> Result<Self, FlatexError> {
        Self::new(Value::from_json(json))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn add<S: AsRef<str>>(&mut self, path: &[S], value: Option<Value>) {
        let Some(value) = value else {
            return;
        };

        let cur = self.walk_or_create(self.root, path);
        trace!(depth = self.nodes[cur].depth, "replacing subtree");
        self.reset(cur);
        self.build(cur, value);
    }

    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<Value> {
        if is_pattern(path) {
            let matches = self.resolve(path);
            if matches.is_empty() {
                return None;
            }
            return Some(Value::List(
                matches.iter().map(|m| self.export_node(m.node)).collect(),
            ));
        }

        self.find(path).map(|id| self.export_node(id))
    }

    pub fn export(&self) -> Value {
        self.export_node(self.root)
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.export().to_json()
    }

    pub fn sort(&mut self) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id];
            node.edges.sort_by(|a, b| compare_labels(&a.label, &b.label));
            stack.extend(node.edges.iter().map(|e| e.child));
        }
    }

    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend(self.nodes[id].edges.iter().map(|e| e.child));
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        let root = &self.nodes[self.root];
        root.edges.is_empty() && !root.is_leaf()
    }

    pub(crate) fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        let mut cur = self.root;
        for seg in path {
            cur = self.child(cur, seg.as_ref())?;
        }
        Some(cur)
    }

    pub(crate) fn child(&self, id: NodeId, label: &str) -> Option<NodeId> {
        self.nodes[id].edge(label).map(|e| e.child)
    }

    pub(crate) fn alloc(&mut self, depth: usize) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Node::new(depth);
                id
            }
            None => {
                self.nodes.push(Node::new(depth));
                self.nodes.len() - 1
            }
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = std::mem::replace(&mut self.nodes[id], Node::new(0));
            stack.extend(node.edges.into_iter().map(|e| e.child));
            self.free.push(id);
        }
    }

    pub(crate) fn reset(&mut self, id: NodeId) {
        let edges = std::mem::take(&mut self.nodes[id].edges);
        for edge in edges {
            self.release(edge.child);
        }
        let node = &mut self.nodes[id];
        node.value = None;
        node.is_collection = false;
    }

    // An edge already carrying `label` is overwritten and its subtree released.
    pub(crate) fn attach(&mut self, parent: NodeId, label: &str, child: NodeId) {
        self.nodes[parent].value = None;
        match self.nodes[parent].position(label) {
            Some(pos) => {
                let old = std::mem::replace(&mut self.nodes[parent].edges[pos].child, child);
                if old != child {
                    self.release(old);
                }
            }
            None => self.nodes[parent].edges.push(Edge {
                label: label.to_string(),
                child,
            }),
        }
    }

    pub(crate) fn detach(&mut self, parent: NodeId, label: &str) -> Option<Edge> {
        let pos = self.nodes[parent].position(label)?;
        Some(self.nodes[parent].edges.remove(pos))
    }

    pub(crate) fn set_depth(&mut self, id: NodeId, depth: usize) {
        let mut stack = vec![(id, depth)];
        while let Some((id, depth)) = stack.pop() {
            let node = &mut self.nodes[id];
            node.depth = depth;
            stack.extend(node.edges.iter().map(|e| (e.child, depth + 1)));
        }
    }

    fn build(&mut self, id: NodeId, value: Value) {
        let depth = self.nodes[id].depth;
        match value {
            Value::Map(entries) if !entries.is_empty() => {
                for (key, v) in entries {
                    let child = self.alloc(depth + 1);
                    self.nodes[id].edges.push(Edge { label: key, child });
                    self.build(child, v);
                }
            }
            Value::List(items) if !items.is_empty() => {
                self.nodes[id].is_collection = true;
                for (i, v) in items.into_iter().enumerate() {
                    let child = self.alloc(depth + 1);
                    self.nodes[id].edges.push(Edge {
                        label: i.to_string(),
                        child,
                    });
                    self.build(child, v);
                }
            }
            Value::List(_) => {
                let node = &mut self.nodes[id];
                node.is_collection = true;
                node.value = Some(Value::empty_list());
            }
            other => self.nodes[id].value = Some(other),
        }
    }

    pub(crate) fn export_node(&self, id: NodeId) -> Value {
        let node = &self.nodes[id];
        if node.edges.is_empty() {
            return match &node.value {
                Some(v) => v.clone(),
                None if node.is_collection => Value::empty_list(),
                None => Value::empty_map(),
            };
        }

        if node.is_collection {
            let mut edges: Vec<&Edge> = node.edges.iter().collect();
            edges.sort_by(|a, b| compare_labels(&a.label, &b.label));
            return Value::List(edges.iter().map(|e| self.export_node(e.child)).collect());
        }

        let entries: BTreeMap<String, Value> = node
            .edges
            .iter()
            .map(|e| (e.label.clone(), self.export_node(e.child)))
            .collect();
        Value::Map(entries)
    }
}
