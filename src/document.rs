use crate::plan::Plan;
use crate::tree::Tree;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

pub fn read(path: &str) -> Result<String> {
    if path == "-" {
        let mut data = String::new();
        std::io::stdin()
            .read_to_string(&mut data)
            .context("Failed to read stdin")?;
        return Ok(data);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

pub fn load(path: &str) -> Result<Tree> {
    let data = read(path)?;
    let json: serde_json::Value =
        serde_json::from_str(&data).with_context(|| format!("Invalid JSON in {}", path))?;
    let tree = Tree::from_json(json).with_context(|| format!("Empty document: {}", path))?;
    Ok(tree)
}

pub fn load_plan(path: &str) -> Result<Plan> {
    let data = read(path)?;
    let plan = Plan::from_json(&data).with_context(|| format!("Invalid plan: {}", path))?;
    Ok(plan)
}

pub fn save(path: &str, tree: &Tree) -> Result<()> {
    let data = serde_json::to_string_pretty(&tree.to_json())?;
    fs::write(path, data).with_context(|| format!("Failed to write to file: {}", path))?;
    Ok(())
}

pub fn exists(path: &str) -> bool {
    Path::new(path).exists()
}
