//! Line-level diff: LCS alignment of two texts split on `\n`.
//!
//! The edit script is reconstructed by walking the LCS table back from the
//! bottom-right cell. When moving left and moving up score the same, the walk
//! moves left and emits `added` first; reversed, that places removals before
//! additions in the final script. Other minimal scripts exist for such
//! inputs, but this one is the stable output.

use serde::{Deserialize, Serialize};
use tracing::debug;

use cmpkit_types::ChangeKind;

use crate::table::AlignmentTable;

/// One entry of a line edit script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOperation {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// The line text, without its `\n`.
    pub value: String,
    /// 1-based line number: in the old text for `removed`, in the new text
    /// for `added` and `equal`.
    pub line: usize,
}

/// Tally of an edit script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    /// Old line count plus added lines.
    pub total: usize,
}

impl DiffStats {
    fn tally(changes: &[EditOperation]) -> Self {
        let mut stats = Self::default();
        for op in changes {
            match op.kind {
                ChangeKind::Added => stats.added += 1,
                ChangeKind::Removed => stats.removed += 1,
                _ => stats.unchanged += 1,
            }
        }
        stats.total = stats.unchanged + stats.removed + stats.added;
        stats
    }
}

/// The result of diffing two texts line by line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiff {
    /// The edit script, in left-to-right order.
    pub changes: Vec<EditOperation>,
    pub stats: DiffStats,
}

/// Line GNU diff prints after a final line that has no `\n`.
pub const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// A contiguous region of changes plus surrounding context.
///
/// Hunks describe the texts as files: a trailing `\n` terminates the last
/// line rather than starting an empty one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    /// Line number in the old text where this hunk starts (1-based, or the
    /// line before an insertion when `old_count` is 0).
    pub old_start: usize,
    /// Number of old lines covered by this hunk.
    pub old_count: usize,
    /// Line number in the new text where this hunk starts.
    pub new_start: usize,
    /// Number of new lines covered by this hunk.
    pub new_count: usize,
    /// The operations in this hunk.
    pub lines: Vec<EditOperation>,
    /// The hunk holds the old text's last line, and that line has no `\n`.
    pub old_missing_newline: bool,
    /// The hunk holds the new text's last line, and that line has no `\n`.
    pub new_missing_newline: bool,
}

impl DiffHunk {
    /// The `@@ -a,b +c,d @@` header. A count of one is left out, as GNU
    /// diff does.
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            hunk_range(self.old_start, self.old_count),
            hunk_range(self.new_start, self.new_count)
        )
    }

    /// Indices into `lines` after which [`NO_NEWLINE_MARKER`] is printed.
    pub fn missing_newline_after(&self) -> Vec<usize> {
        let (mut old_seen, mut new_seen) = (0usize, 0usize);
        let mut marks = Vec::new();
        for (idx, op) in self.lines.iter().enumerate() {
            let mut ends_side = false;
            if op.kind != ChangeKind::Added {
                old_seen += 1;
                ends_side |= self.old_missing_newline && old_seen == self.old_count;
            }
            if op.kind != ChangeKind::Removed {
                new_seen += 1;
                ends_side |= self.new_missing_newline && new_seen == self.new_count;
            }
            if ends_side {
                marks.push(idx);
            }
        }
        marks
    }
}

fn hunk_range(start: usize, count: usize) -> String {
    if count == 1 {
        start.to_string()
    } else {
        format!("{start},{count}")
    }
}

impl LineDiff {
    /// Returns `true` if the two texts had identical lines.
    pub fn is_identical(&self) -> bool {
        self.stats.added == 0 && self.stats.removed == 0
    }

    /// The old text's lines, rebuilt from `equal` and `removed` entries.
    pub fn old_lines(&self) -> Vec<&str> {
        self.side(ChangeKind::Removed)
    }

    /// The new text's lines, rebuilt from `equal` and `added` entries.
    pub fn new_lines(&self) -> Vec<&str> {
        self.side(ChangeKind::Added)
    }

    fn side(&self, kind: ChangeKind) -> Vec<&str> {
        self.changes
            .iter()
            .filter(|op| op.kind == ChangeKind::Equal || op.kind == kind)
            .map(|op| op.value.as_str())
            .collect()
    }

    /// Group the texts into hunks with `context` unchanged lines on either
    /// side of each change. Hunks whose context would touch are merged.
    ///
    /// Unlike [`LineDiff::changes`], hunks treat a trailing `\n` as the end
    /// of the last line, so their counts match `diff -u`. Lines are
    /// realigned with the final newline as part of the last line, which
    /// costs a second LCS pass.
    pub fn hunks(&self, context: usize) -> Vec<DiffHunk> {
        let old_text = self.old_lines().join("\n");
        let new_text = self.new_lines().join("\n");
        let old = FileLines::new(&old_text);
        let new = FileLines::new(&new_text);
        let script: Vec<EditOperation> = edit_script(&old.tokens, &new.tokens)
            .into_iter()
            .map(|(kind, idx)| {
                let (text, _) = if kind == ChangeKind::Removed {
                    old.tokens[idx]
                } else {
                    new.tokens[idx]
                };
                EditOperation {
                    kind,
                    value: text.to_string(),
                    line: idx + 1,
                }
            })
            .collect();

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for (idx, op) in script.iter().enumerate() {
            if op.kind == ChangeKind::Equal {
                continue;
            }
            let start = idx.saturating_sub(context);
            let end = (idx + context).min(script.len() - 1);
            match ranges.last_mut() {
                Some(last) if start <= last.1 + 1 => last.1 = end,
                _ => ranges.push((start, end)),
            }
        }

        // Lines of each side consumed before every operation.
        let mut old_before = Vec::with_capacity(script.len());
        let mut new_before = Vec::with_capacity(script.len());
        let (mut old_pos, mut new_pos) = (0usize, 0usize);
        for op in &script {
            old_before.push(old_pos);
            new_before.push(new_pos);
            match op.kind {
                ChangeKind::Added => new_pos += 1,
                ChangeKind::Removed => old_pos += 1,
                _ => {
                    old_pos += 1;
                    new_pos += 1;
                }
            }
        }

        ranges
            .into_iter()
            .map(|(start, end)| {
                let lines = script[start..=end].to_vec();
                let old_count = lines
                    .iter()
                    .filter(|op| op.kind != ChangeKind::Added)
                    .count();
                let new_count = lines
                    .iter()
                    .filter(|op| op.kind != ChangeKind::Removed)
                    .count();
                DiffHunk {
                    old_start: hunk_start(old_before[start], old_count),
                    old_count,
                    new_start: hunk_start(new_before[start], new_count),
                    new_count,
                    old_missing_newline: old.missing_newline
                        && old_count > 0
                        && old_before[start] + old_count == old.tokens.len(),
                    new_missing_newline: new.missing_newline
                        && new_count > 0
                        && new_before[start] + new_count == new.tokens.len(),
                    lines,
                }
            })
            .collect()
    }

    /// Render as unified diff text. Identical inputs render as an empty
    /// string.
    pub fn to_unified(&self, old_label: &str, new_label: &str, context: usize) -> String {
        let hunks = self.hunks(context);
        if hunks.is_empty() {
            return String::new();
        }

        let mut out = format!("--- {old_label}\n+++ {new_label}\n");
        for hunk in &hunks {
            out.push_str(&hunk.header());
            out.push('\n');
            let marks = hunk.missing_newline_after();
            for (idx, op) in hunk.lines.iter().enumerate() {
                let marker = match op.kind {
                    ChangeKind::Added => '+',
                    ChangeKind::Removed => '-',
                    _ => ' ',
                };
                out.push(marker);
                out.push_str(&op.value);
                out.push('\n');
                if marks.contains(&idx) {
                    out.push_str(NO_NEWLINE_MARKER);
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// A text viewed as a file: each token is a line paired with whether a `\n`
/// follows it. Only the last token can lack one.
struct FileLines<'a> {
    tokens: Vec<(&'a str, bool)>,
    missing_newline: bool,
}

impl<'a> FileLines<'a> {
    fn new(text: &'a str) -> Self {
        if text.is_empty() {
            return Self {
                tokens: Vec::new(),
                missing_newline: false,
            };
        }
        let mut lines = split_lines(text);
        let missing_newline = !text.ends_with('\n');
        if !missing_newline {
            lines.pop();
        }
        let last = lines.len().saturating_sub(1);
        let tokens = lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| (line, idx < last || !missing_newline))
            .collect();
        Self {
            tokens,
            missing_newline,
        }
    }
}

fn hunk_start(consumed: usize, count: usize) -> usize {
    if count == 0 {
        consumed
    } else {
        consumed + 1
    }
}

/// Split text into lines on `\n`.
///
/// A trailing newline produces a final empty line, and the empty string is a
/// single empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Walk the LCS table back from the bottom-right cell. Each step is the
/// operation kind plus the 0-based index of its element: in `new` for
/// `equal` and `added`, in `old` for `removed`.
fn edit_script<T: PartialEq>(old: &[T], new: &[T]) -> Vec<(ChangeKind, usize)> {
    let table = AlignmentTable::lcs(old, new);
    let (mut i, mut j) = (old.len(), new.len());
    let mut steps = Vec::with_capacity(i.max(j));

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            steps.push((ChangeKind::Equal, j - 1));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table.get(i, j - 1) >= table.get(i - 1, j)) {
            steps.push((ChangeKind::Added, j - 1));
            j -= 1;
        } else {
            steps.push((ChangeKind::Removed, i - 1));
            i -= 1;
        }
    }
    steps.reverse();
    steps
}

/// Compute a line-by-line diff between two texts.
pub fn line_diff(old: &str, new: &str) -> LineDiff {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let changes: Vec<EditOperation> = edit_script(&old_lines, &new_lines)
        .into_iter()
        .map(|(kind, idx)| {
            let value = if kind == ChangeKind::Removed {
                old_lines[idx]
            } else {
                new_lines[idx]
            };
            EditOperation {
                kind,
                value: value.to_string(),
                line: idx + 1,
            }
        })
        .collect();

    let stats = DiffStats::tally(&changes);
    debug!(
        old_lines = old_lines.len(),
        new_lines = new_lines.len(),
        added = stats.added,
        removed = stats.removed,
        "line diff computed"
    );

    LineDiff { changes, stats }
}
