use crate::node::NodeId;
use crate::tree::Tree;
use crate::value::Value;
use std::fmt;

const BRANCH: &str = "├── ";
const LAST: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

fn leaf(value: &Value) -> String {
    match value {
        Value::Bool(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Str(v) => v.clone(),
        Value::List(_) => "[]".to_string(),
        Value::Map(_) => "{}".to_string(),
    }
}

impl Tree {
    fn write_edges(&self, f: &mut fmt::Formatter<'_>, id: NodeId, prefix: &str) -> fmt::Result {
        let edges = &self.nodes[id].edges;
        for (i, e) in edges.iter().enumerate() {
            let is_last = i + 1 == edges.len();
            let child = &self.nodes[e.child];

            write!(f, "{}{}{}", prefix, if is_last { LAST } else { BRANCH }, e.label)?;
            if child.edges.is_empty() {
                match &child.value {
                    Some(v) => write!(f, "\t{}", leaf(v))?,
                    None if child.is_collection => f.write_str("\t[]")?,
                    None => f.write_str("\t{}")?,
                }
            } else if child.is_collection {
                f.write_str(" []")?;
            }
            writeln!(f)?;

            let next = format!("{}{}", prefix, if is_last { BLANK } else { PIPE });
            self.write_edges(f, e.child, &next)?;
        }
        Ok(())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = &self.nodes[self.root];
        if root.edges.is_empty() {
            if let Some(v) = &root.value {
                return writeln!(f, "{}", leaf(v));
            }
        }
        self.write_edges(f, self.root, "")
    }
}
