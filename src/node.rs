use crate::value::Value;

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub label: String,
    pub child: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub depth: usize,
    pub is_collection: bool,
    pub value: Option<Value>,
    pub edges: Vec<Edge>,
}

impl Node {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            is_collection: false,
            value: None,
            edges: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty() && self.value.as_ref().is_some_and(Value::is_scalar)
    }

    pub fn edge(&self, label: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.label == label)
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.edges.iter().position(|e| e.label == label)
    }
}
