//! Paths addressing nodes inside JSON-like trees.
//!
//! A [`TreePath`] is a list of [`PathSegment`]s walked from the root. Paths
//! render to text in one of two [`PathStyle`]s and parse back to the exact
//! same segments:
//!
//! - `Dot`: `config.items.0.name`, the root is `$`.
//! - `Bracket`: `$.config.items[0].name`.
//!
//! Characters that would be read as structure (`.`, `[`, `]`, `\`, `$`) are
//! backslash-escaped inside keys. In dot style a key made only of ASCII
//! digits is prefixed with `\` so that it is not read back as an index.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeError;

const ROOT: &str = "$";

/// One step of a [`TreePath`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object member.
    Key(String),
    /// An array element (zero-based).
    Index(usize),
}

/// Text form of a [`TreePath`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Segments joined with `.`, indices as plain numbers.
    #[default]
    Dot,
    /// Rooted at `$`, keys as `.key`, indices as `[n]`.
    Bracket,
}

impl PathStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Bracket => "bracket",
        }
    }
}

impl fmt::Display for PathStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathStyle {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" => Ok(Self::Dot),
            "bracket" => Ok(Self::Bracket),
            other => Err(TypeError::UnknownPathStyle(other.to_string())),
        }
    }
}

/// Location of a node inside a tree, as a list of segments from the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TreePath {
    segments: Vec<PathSegment>,
}

impl TreePath {
    /// The empty path, addressing the tree root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments (the depth below the root).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// A new path one object member deeper.
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    /// A new path one array element deeper.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Look up the node this path addresses inside `root`.
    ///
    /// Returns `None` when a key is missing, an index is out of bounds, or a
    /// segment does not match the container kind it meets.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| match segment {
                PathSegment::Key(key) => node.as_object()?.get(key),
                PathSegment::Index(index) => node.as_array()?.get(*index),
            })
    }

    /// Render the path as text.
    pub fn render(&self, style: PathStyle) -> String {
        match style {
            PathStyle::Dot => self.render_dot(),
            PathStyle::Bracket => self.render_bracket(),
        }
    }

    /// Parse text produced by [`render`](Self::render) with the same style.
    pub fn parse(text: &str, style: PathStyle) -> Result<Self, TypeError> {
        if text == ROOT {
            return Ok(Self::root());
        }
        let segments = match style {
            PathStyle::Dot => parse_dot(text)?,
            PathStyle::Bracket => parse_bracket(text)?,
        };
        Ok(Self { segments })
    }

    fn render_dot(&self) -> String {
        if self.is_root() {
            return ROOT.to_string();
        }
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match segment {
                PathSegment::Index(index) => out.push_str(&index.to_string()),
                PathSegment::Key(key) => {
                    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
                        out.push('\\');
                    }
                    push_escaped(&mut out, key);
                }
            }
        }
        out
    }

    fn render_bracket(&self) -> String {
        let mut out = String::from(ROOT);
        for segment in &self.segments {
            match segment {
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
                PathSegment::Key(key) => {
                    out.push('.');
                    push_escaped(&mut out, key);
                }
            }
        }
        out
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(PathStyle::Dot))
    }
}

fn is_reserved(c: char) -> bool {
    matches!(c, '.' | '[' | ']' | '\\' | '$')
}

fn push_escaped(out: &mut String, key: &str) {
    for c in key.chars() {
        if is_reserved(c) {
            out.push('\\');
        }
        out.push(c);
    }
}

fn parse_dot(text: &str) -> Result<Vec<PathSegment>, TypeError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let next = chars
                    .next()
                    .ok_or_else(|| TypeError::invalid_path(text, "dangling escape"))?;
                current.push(next);
                escaped = true;
            }
            '.' => {
                segments.push(dot_segment(text, std::mem::take(&mut current), escaped)?);
                escaped = false;
            }
            c if is_reserved(c) => {
                return Err(TypeError::invalid_path(
                    text,
                    format!("unescaped {c:?} in dot path"),
                ));
            }
            c => current.push(c),
        }
    }
    segments.push(dot_segment(text, current, escaped)?);
    Ok(segments)
}

fn dot_segment(text: &str, raw: String, escaped: bool) -> Result<PathSegment, TypeError> {
    if !escaped && !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let index = raw
            .parse()
            .map_err(|e| TypeError::invalid_path(text, format!("bad index {raw:?}: {e}")))?;
        Ok(PathSegment::Index(index))
    } else {
        Ok(PathSegment::Key(raw))
    }
}

fn parse_bracket(text: &str) -> Result<Vec<PathSegment>, TypeError> {
    let rest = text
        .strip_prefix(ROOT)
        .ok_or_else(|| TypeError::invalid_path(text, "bracket path must start with '$'"))?;

    let mut segments = Vec::new();
    let mut chars = rest.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                let mut key = String::new();
                while let Some(&next) = chars.peek() {
                    match next {
                        '.' | '[' => break,
                        '\\' => {
                            chars.next();
                            let escaped = chars
                                .next()
                                .ok_or_else(|| TypeError::invalid_path(text, "dangling escape"))?;
                            key.push(escaped);
                        }
                        ']' | '$' => {
                            return Err(TypeError::invalid_path(
                                text,
                                format!("unescaped {next:?} in key"),
                            ));
                        }
                        _ => {
                            key.push(next);
                            chars.next();
                        }
                    }
                }
                segments.push(PathSegment::Key(key));
            }
            '[' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(d) if d.is_ascii_digit() => digits.push(d),
                        Some(other) => {
                            return Err(TypeError::invalid_path(
                                text,
                                format!("unexpected {other:?} in index"),
                            ));
                        }
                        None => return Err(TypeError::invalid_path(text, "unterminated index")),
                    }
                }
                let index = digits.parse().map_err(|e| {
                    TypeError::invalid_path(text, format!("bad index {digits:?}: {e}"))
                })?;
                segments.push(PathSegment::Index(index));
            }
            other => {
                return Err(TypeError::invalid_path(
                    text,
                    format!("expected '.' or '[', found {other:?}"),
                ));
            }
        }
    }
    Ok(segments)
}
