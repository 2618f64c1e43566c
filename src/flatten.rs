use crate::error::FlatexError;
use crate::path::WILDCARD;
use crate::value::Value;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub const DEFAULT_SEPARATOR: &str = ".";
pub const SIZE_KEY: &str = "#";

pub trait Tokenizer {
    fn separator(&self) -> &str;
    fn token(&self, keys: &[String]) -> String;
    fn keys(&self, token: &str) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTokenizer(String);

impl StringTokenizer {
    pub fn new(sep: impl Into<String>) -> Self {
        Self(sep.into())
    }
}

impl Default for StringTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl Tokenizer for StringTokenizer {
    fn separator(&self) -> &str {
        &self.0
    }

    fn token(&self, keys: &[String]) -> String {
        keys.join(&self.0)
    }

    fn keys(&self, token: &str) -> Vec<String> {
        token.split(self.0.as_str()).map(str::to_string).collect()
    }
}

#[derive(Debug, Clone)]
pub struct FlatMap<T: Tokenizer = StringTokenizer> {
    entries: BTreeMap<String, Value>,
    tokenizer: T,
    collection: Regex,
}

impl<T: Tokenizer> FlatMap<T> {
    pub fn new(tokenizer: T) -> Result<Self, FlatexError> {
        let sep = tokenizer.separator();
        if sep.is_empty() {
            return Err(FlatexError::InvalidPattern("empty separator".to_string()));
        }
        if sep.contains(WILDCARD) {
            return Err(FlatexError::InvalidPattern(format!(
                "separator {:?} contains the wildcard",
                sep
            )));
        }

        let sep = regex::escape(sep);
        let collection = Regex::new(&format!(r"{sep}\*{sep}"))?;
        Ok(Self {
            entries: BTreeMap::new(),
            tokenizer,
            collection,
        })
    }

    pub fn flatten(map: &BTreeMap<String, Value>, tokenizer: T) -> Result<Self, FlatexError> {
        let mut flat = Self::new(tokenizer)?;
        let mut ks = Vec::new();
        for (k, v) in map {
            ks.push(k.clone());
            flat.flatten_value(v, &mut ks);
            ks.pop();
        }
        Ok(flat)
    }

    fn flatten_value(&mut self, value: &Value, ks: &mut Vec<String>) {
        match value {
            Value::Map(map) => {
                for (k, v) in map {
                    ks.push(k.clone());
                    self.flatten_value(v, ks);
                    ks.pop();
                }
            }
            Value::List(items) => {
                ks.push(SIZE_KEY.to_string());
                let size = self.tokenizer.token(ks);
                ks.pop();
                self.entries.insert(size, Value::Int(items.len() as i64));

                for (i, v) in items.iter().enumerate() {
                    ks.push(i.to_string());
                    self.flatten_value(v, ks);
                    ks.pop();
                }
            }
            scalar => {
                let key = self.tokenizer.token(ks);
                self.entries.insert(key, scalar.clone());
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn move_key(&mut self, original: &str, new_key: &str) {
        if let Some(v) = self.entries.remove(original) {
            self.entries.insert(new_key.to_string(), v);
            return;
        }

        if self.collection.is_match(original) {
            self.move_slice_attribute(original, new_key);
            return;
        }

        let sep = self.tokenizer.separator();
        let prefix = format!("{original}{sep}");
        let renamed: Vec<(String, String)> = self
            .entries
            .keys()
            .filter_map(|k| {
                let rest = k.strip_prefix(&prefix)?;
                Some((k.clone(), format!("{new_key}{sep}{rest}")))
            })
            .collect();
        self.rename_all(renamed);
    }

    pub fn del(&mut self, prefix: &str) {
        if self.entries.remove(prefix).is_some() {
            return;
        }

        if self.collection.is_match(prefix) {
            self.del_slice_attribute(prefix);
            return;
        }

        let nested = format!("{prefix}{}", self.tokenizer.separator());
        self.entries.retain(|k, _| !k.starts_with(&nested));
    }

    pub fn expand(&self) -> Value {
        let mut root = BTreeMap::new();
        for (k, v) in &self.entries {
            insert_path(&mut root, &self.tokenizer.keys(k), v.clone());
        }
        expand_collections(Value::Map(root))
    }

    fn move_slice_attribute(&mut self, original: &str, new_key: &str) {
        let orig = self.tokenizer.keys(original);
        let target = self.tokenizer.keys(new_key);
        let (Some(i), Some(j)) = (wildcard_at(&orig), wildcard_at(&target)) else {
            debug!(original, new_key, "move: destination has no wildcard");
            return;
        };
        let (o_prefix, o_rest) = (&orig[..i], &orig[i + 1..]);
        let (t_prefix, t_rest) = (&target[..j], &target[j + 1..]);

        if o_rest.iter().any(|s| s == WILDCARD) {
            for id in self.element_ids(o_prefix) {
                let from = self.tokenizer.token(&splice(o_prefix, &id, o_rest));
                let to = self.tokenizer.token(&splice(t_prefix, &id, t_rest));
                self.move_key(&from, &to);
            }
            return;
        }

        let renamed: Vec<(String, String)> = self
            .entries
            .keys()
            .filter_map(|k| {
                let ks = self.tokenizer.keys(k);
                let remainder = element_remainder(&ks, o_prefix)?;
                let tail = remainder.strip_prefix(o_rest)?;
                let mut moved = splice(t_prefix, &ks[i], t_rest);
                moved.extend_from_slice(tail);
                Some((k.clone(), self.tokenizer.token(&moved)))
            })
            .collect();
        self.rename_all(renamed);
    }

    fn del_slice_attribute(&mut self, prefix: &str) {
        let pattern = self.tokenizer.keys(prefix);
        let Some(i) = wildcard_at(&pattern) else {
            return;
        };
        let (p_prefix, p_rest) = (&pattern[..i], &pattern[i + 1..]);

        if p_rest.iter().any(|s| s == WILDCARD) {
            for id in self.element_ids(p_prefix) {
                let nested = self.tokenizer.token(&splice(p_prefix, &id, p_rest));
                self.del(&nested);
            }
            return;
        }

        let doomed: Vec<String> = self
            .entries
            .keys()
            .filter(|k| {
                let ks = self.tokenizer.keys(k);
                element_remainder(&ks, p_prefix).is_some_and(|r| r.starts_with(p_rest))
            })
            .cloned()
            .collect();
        for k in doomed {
            self.entries.remove(&k);
        }
    }

    fn element_ids(&self, prefix: &[String]) -> BTreeSet<String> {
        self.entries
            .keys()
            .filter_map(|k| {
                let ks = self.tokenizer.keys(k);
                element_remainder(&ks, prefix)?;
                Some(ks[prefix.len()].clone())
            })
            .collect()
    }

    fn rename_all(&mut self, renamed: Vec<(String, String)>) {
        let moved: Vec<(String, Value)> = renamed
            .into_iter()
            .filter_map(|(from, to)| self.entries.remove(&from).map(|v| (to, v)))
            .collect();
        self.entries.extend(moved);
    }
}

fn wildcard_at(keys: &[String]) -> Option<usize> {
    keys.iter().position(|s| s == WILDCARD)
}

fn element_remainder<'a>(ks: &'a [String], prefix: &[String]) -> Option<&'a [String]> {
    if ks.len() <= prefix.len() + 1 || !ks.starts_with(prefix) {
        return None;
    }
    Some(&ks[prefix.len() + 1..])
}

fn splice(prefix: &[String], id: &str, rest: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(prefix.len() + rest.len() + 1);
    out.extend_from_slice(prefix);
    out.push(id.to_string());
    out.extend_from_slice(rest);
    out
}

fn insert_path(map: &mut BTreeMap<String, Value>, keys: &[String], value: Value) {
    let Some((first, rest)) = keys.split_first() else {
        return;
    };
    if rest.is_empty() {
        map.insert(first.clone(), value);
        return;
    }

    let slot = map.entry(first.clone()).or_insert_with(Value::empty_map);
    if !matches!(slot, Value::Map(_)) {
        *slot = Value::empty_map();
    }
    if let Value::Map(child) = slot {
        insert_path(child, rest, value);
    }
}

fn expand_collections(value: Value) -> Value {
    let Value::Map(map) = value else {
        return value;
    };
    let mut map: BTreeMap<String, Value> = map
        .into_iter()
        .map(|(k, v)| (k, expand_collections(v)))
        .collect();

    let size = match map.get(SIZE_KEY) {
        Some(Value::Int(n)) if *n >= 0 => *n as usize,
        _ => return Value::Map(map),
    };
    Value::List((0..size).filter_map(|i| map.remove(&i.to_string())).collect())
}
