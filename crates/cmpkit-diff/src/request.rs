//! JSON request dispatch for callers at a dynamic boundary.
//!
//! A request is a JSON object naming the operation in `op` plus its
//! arguments:
//!
//! ```json
//! {"op": "similarity", "a": "kitten", "b": "sitting"}
//! {"op": "line_diff", "old": "a\nb", "new": "a\nc"}
//! {"op": "structural_diff", "a": {"x": 1}, "b": "{\"x\": 2}"}
//! ```
//!
//! Arguments are checked before any comparison runs. Structural arguments
//! given as strings are parsed as serialized trees.

use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::DiffConfig;
use crate::error::{DiffError, DiffResult};
use crate::line_diff::line_diff;
use crate::similarity::similarity_with;
use crate::structural_diff::{parse_tree, structural_diff_with};

/// The comparison a request asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Similarity,
    LineDiff,
    StructuralDiff,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Similarity => "similarity",
            Self::LineDiff => "line_diff",
            Self::StructuralDiff => "structural_diff",
        }
    }

    /// Look up an operation by name. Camel-case spellings are accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "similarity" => Some(Self::Similarity),
            "line_diff" | "lineDiff" => Some(Self::LineDiff),
            "structural_diff" | "structuralDiff" => Some(Self::StructuralDiff),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validate a request and run the operation it names.
///
/// Returns the operation's result as JSON: a number for `similarity`, a
/// `{changes, stats}` object for `line_diff`, and a change array for
/// `structural_diff`.
pub fn dispatch(request: &Value, config: &DiffConfig) -> DiffResult<Value> {
    let args = request
        .as_object()
        .ok_or_else(|| DiffError::mismatch("request", "an object", request))?;
    let op_name = require_str(args, "op")?;
    let op = Operation::from_name(op_name).ok_or_else(|| DiffError::Type {
        field: "op".into(),
        expected: "one of similarity, line_diff, structural_diff".into(),
        actual: format!("{op_name:?}"),
    })?;
    debug!(%op, "dispatching request");

    match op {
        Operation::Similarity => {
            let a = require_str(args, "a")?;
            let b = require_str(args, "b")?;
            Ok(Value::from(similarity_with(a, b, config)))
        }
        Operation::LineDiff => {
            let old = require_str(args, "old")?;
            let new = require_str(args, "new")?;
            to_json(&line_diff(old, new))
        }
        Operation::StructuralDiff => {
            let a = require_tree(args, "a")?;
            let b = require_tree(args, "b")?;
            to_json(&structural_diff_with(&a, &b, config).changes)
        }
    }
}

fn require_str<'a>(args: &'a Map<String, Value>, field: &str) -> DiffResult<&'a str> {
    match args.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(DiffError::mismatch(field, "a string", other)),
        None => Err(DiffError::missing(field, "a string")),
    }
}

fn require_tree(args: &Map<String, Value>, field: &str) -> DiffResult<Value> {
    match args.get(field) {
        Some(Value::String(text)) => parse_tree(text, field),
        Some(tree) => Ok(tree.clone()),
        None => Err(DiffError::missing(field, "a tree or serialized tree text")),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> DiffResult<Value> {
    serde_json::to_value(value).map_err(|e| DiffError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(request: Value) -> DiffResult<Value> {
        dispatch(&request, &DiffConfig::default())
    }

    #[test]
    fn similarity_request() {
        let result = run(json!({"op": "similarity", "a": "kitten", "b": "sitting"})).unwrap();
        assert_eq!(result, json!(0.5714));
    }

    #[test]
    fn line_diff_request() {
        let result = run(json!({
            "op": "line_diff",
            "old": "line1\nline2",
            "new": "line1\nline2\nline3"
        }))
        .unwrap();
        assert_eq!(
            result["stats"],
            json!({"added": 1, "removed": 0, "unchanged": 2, "total": 3})
        );
        assert_eq!(result["changes"][2], json!({"type": "added", "value": "line3", "line": 3}));
    }

    #[test]
    fn camel_case_op_names() {
        assert!(run(json!({"op": "lineDiff", "old": "a", "new": "a"})).is_ok());
        assert!(run(json!({"op": "structuralDiff", "a": 1, "b": 1})).is_ok());
    }

    #[test]
    fn structural_diff_request_accepts_trees_and_text() {
        let result = run(json!({
            "op": "structural_diff",
            "a": {"a": 1},
            "b": "{\"a\": 1, \"b\": 2}"
        }))
        .unwrap();
        assert_eq!(result, json!([{"type": "added", "path": "b", "value": 2}]));
    }

    #[test]
    fn structural_diff_request_honours_path_style() {
        let config = DiffConfig::default().with_path_style(cmpkit_types::PathStyle::Bracket);
        let result = dispatch(
            &json!({"op": "structural_diff", "a": {"a": [1]}, "b": {"a": [2]}}),
            &config,
        )
        .unwrap();
        assert_eq!(result[0]["path"], "$.a[0]");
    }

    #[test]
    fn malformed_tree_text_is_parse_error() {
        let err = run(json!({"op": "structural_diff", "a": "{", "b": {}})).unwrap_err();
        assert!(matches!(err, DiffError::Parse { ref side, .. } if side == "a"));
    }

    #[test]
    fn missing_argument_is_type_error() {
        let err = run(json!({"op": "similarity", "a": "x"})).unwrap_err();
        match err {
            DiffError::Type { field, actual, .. } => {
                assert_eq!(field, "b");
                assert_eq!(actual, "nothing");
            }
            other => panic!("expected Type, got {other:?}"),
        }
    }

    #[test]
    fn non_string_argument_is_type_error() {
        let err = run(json!({"op": "line_diff", "old": 5, "new": "x"})).unwrap_err();
        match err {
            DiffError::Type { field, actual, .. } => {
                assert_eq!(field, "old");
                assert_eq!(actual, "a number");
            }
            other => panic!("expected Type, got {other:?}"),
        }
    }

    #[test]
    fn unknown_op_is_type_error() {
        let err = run(json!({"op": "base64"})).unwrap_err();
        assert!(matches!(err, DiffError::Type { ref field, .. } if field == "op"));
    }

    #[test]
    fn non_object_request_is_type_error() {
        let err = run(json!(["similarity"])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn operation_names_round_trip() {
        for op in [Operation::Similarity, Operation::LineDiff, Operation::StructuralDiff] {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
        assert_eq!(Operation::from_name("lcs"), None);
    }
}
