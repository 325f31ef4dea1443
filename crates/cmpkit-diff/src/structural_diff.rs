//! Structural diff: recursive comparison of two JSON-like trees.
//!
//! Objects are compared key by key, arrays index by index. Keys of the old
//! tree are visited first in their original order, then keys found only in
//! the new tree, so identical inputs always yield the same change list.
//! Values of different kinds (including an array against an object, or null
//! against a container) produce a single `changed` entry and are not
//! descended into.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::debug;

use cmpkit_types::{ChangeKind, PathStyle, TreePath};

use crate::config::DiffConfig;
use crate::error::{DiffError, DiffResult};

/// A single divergence between two trees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeChange {
    /// A member or element present only in the new tree.
    Added { path: String, value: Value },
    /// A member or element present only in the old tree.
    Removed { path: String, value: Value },
    /// A value that differs between the two trees.
    Changed { path: String, from: Value, to: Value },
}

impl TreeChange {
    pub fn path(&self) -> &str {
        match self {
            Self::Added { path, .. } | Self::Removed { path, .. } | Self::Changed { path, .. } => {
                path
            }
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Added { .. } => ChangeKind::Added,
            Self::Removed { .. } => ChangeKind::Removed,
            Self::Changed { .. } => ChangeKind::Changed,
        }
    }
}

/// The result of comparing two trees.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeDiff {
    pub changes: Vec<TreeChange>,
}

impl TreeDiff {
    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn additions(&self) -> usize {
        self.count(ChangeKind::Added)
    }

    pub fn removals(&self) -> usize {
        self.count(ChangeKind::Removed)
    }

    pub fn modifications(&self) -> usize {
        self.count(ChangeKind::Changed)
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind() == kind).count()
    }
}

/// Compare two trees with dot-style paths and no depth limit.
pub fn structural_diff(a: &Value, b: &Value) -> Vec<TreeChange> {
    structural_diff_with(a, b, &DiffConfig::default()).changes
}

/// Compare two trees using the path style and depth limit from `config`.
pub fn structural_diff_with(a: &Value, b: &Value, config: &DiffConfig) -> TreeDiff {
    let mut walker = Walker {
        style: config.path_style,
        max_depth: config.max_depth,
        changes: Vec::new(),
    };
    walker.compare(a, b, &TreePath::root());
    debug!(
        changes = walker.changes.len(),
        style = %config.path_style,
        "structural diff computed"
    );
    TreeDiff {
        changes: walker.changes,
    }
}

/// Parse two serialized trees and compare them.
///
/// Either text failing to parse fails the whole call.
pub fn structural_diff_str(a: &str, b: &str) -> DiffResult<Vec<TreeChange>> {
    let a = parse_tree(a, "a")?;
    let b = parse_tree(b, "b")?;
    Ok(structural_diff(&a, &b))
}

/// Parse serialized tree text; `side` names the argument in the error.
pub fn parse_tree(text: &str, side: &str) -> DiffResult<Value> {
    serde_json::from_str(text).map_err(|e| DiffError::Parse {
        side: side.to_string(),
        message: e.to_string(),
    })
}

struct Walker {
    style: PathStyle,
    max_depth: Option<usize>,
    changes: Vec<TreeChange>,
}

impl Walker {
    fn compare(&mut self, a: &Value, b: &Value, path: &TreePath) {
        if self.max_depth.is_some_and(|depth| path.len() >= depth) {
            if !values_equal(a, b) {
                self.changed(path, a, b);
            }
            return;
        }

        match (a, b) {
            (Value::Object(old), Value::Object(new)) => self.compare_objects(old, new, path),
            (Value::Array(old), Value::Array(new)) => self.compare_arrays(old, new, path),
            _ => {
                if !values_equal(a, b) {
                    self.changed(path, a, b);
                }
            }
        }
    }

    fn compare_objects(
        &mut self,
        old: &Map<String, Value>,
        new: &Map<String, Value>,
        path: &TreePath,
    ) {
        for (key, old_value) in old {
            let child = path.key(key);
            match new.get(key) {
                Some(new_value) => self.compare(old_value, new_value, &child),
                None => self.changes.push(TreeChange::Removed {
                    path: child.render(self.style),
                    value: old_value.clone(),
                }),
            }
        }

        for (key, new_value) in new {
            if !old.contains_key(key) {
                self.changes.push(TreeChange::Added {
                    path: path.key(key).render(self.style),
                    value: new_value.clone(),
                });
            }
        }
    }

    fn compare_arrays(&mut self, old: &[Value], new: &[Value], path: &TreePath) {
        let common = old.len().min(new.len());
        for (index, (old_value, new_value)) in old.iter().zip(new).enumerate() {
            self.compare(old_value, new_value, &path.index(index));
        }
        for (index, old_value) in old.iter().enumerate().skip(common) {
            self.changes.push(TreeChange::Removed {
                path: path.index(index).render(self.style),
                value: old_value.clone(),
            });
        }
        for (index, new_value) in new.iter().enumerate().skip(common) {
            self.changes.push(TreeChange::Added {
                path: path.index(index).render(self.style),
                value: new_value.clone(),
            });
        }
    }

    fn changed(&mut self, path: &TreePath, from: &Value, to: &Value) {
        self.changes.push(TreeChange::Changed {
            path: path.render(self.style),
            from: from.clone(),
            to: to.clone(),
        });
    }
}

/// Deep equality where numbers compare by value, so `1` equals `1.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| values_equal(p, q))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(p), Some(q)) = (x.as_i64(), y.as_i64()) {
        return p == q;
    }
    if let (Some(p), Some(q)) = (x.as_u64(), y.as_u64()) {
        return p == q;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(p), Some(q)) if x.is_f64() || y.is_f64() => p == q,
        _ => false,
    }
}
