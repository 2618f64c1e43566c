use crate::error::FlatexError;
use crate::flatten::DEFAULT_SEPARATOR;
use crate::path::split;
use crate::tree::Tree;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Move { src: String, dst: String },
    Del { path: String },
    Append { src: String, dst: String },
    Sort,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            operations: Vec::new(),
        }
    }
}

impl Plan {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self {
            operations,
            ..Self::default()
        }
    }

    pub fn from_json(data: &str) -> Result<Self, FlatexError> {
        let plan: Plan = serde_json::from_str(data)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<(), FlatexError> {
        if self.separator.is_empty() {
            return Err(FlatexError::InvalidPattern("empty separator".to_string()));
        }
        Ok(())
    }

    pub fn apply(&self, tree: &mut Tree) -> Result<usize, FlatexError> {
        self.validate()?;
        let keys = |p: &str| split(p, &self.separator);

        for (i, op) in self.operations.iter().enumerate() {
            debug!(step = i, ?op, "applying operation");
            match op {
                Operation::Move { src, dst } => tree.move_path(&keys(src), &keys(dst)),
                Operation::Del { path } => tree.del(&keys(path)),
                Operation::Append { src, dst } => tree.append(&keys(src), &keys(dst)),
                Operation::Sort => tree.sort(),
            }
        }

        info!(count = self.operations.len(), "plan applied");
        Ok(self.operations.len())
    }
}
