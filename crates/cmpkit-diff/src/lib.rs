//! Comparison engines for cmpkit.
//!
//! Three independent, pure comparison algorithms. Each takes two immutable
//! inputs and returns an explainable result:
//!
//! - [`line_diff`] -- LCS-based line diff with an ordered edit script and counts
//! - [`structural_diff`] -- path-addressed diff of two JSON-like trees
//! - [`similarity`] -- normalized Levenshtein similarity of two strings
//!
//! # Key Types
//!
//! - [`AlignmentTable`] -- Dense dynamic-programming table shared by the sequence engines
//! - [`LineDiff`] / [`EditOperation`] / [`DiffStats`] / [`DiffHunk`] -- Line-level diff
//! - [`TreeDiff`] / [`TreeChange`] -- Tree-level diff
//! - [`SimilarityReport`] -- Score plus the raw edit distance
//! - [`DiffConfig`] -- Engine options (path style, precision, depth limit)

pub mod config;
pub mod error;
pub mod line_diff;
pub mod request;
pub mod similarity;
pub mod structural_diff;
pub mod table;

pub use config::DiffConfig;
pub use error::{DiffError, DiffResult};
pub use line_diff::{
    line_diff, split_lines, DiffHunk, DiffStats, EditOperation, LineDiff, NO_NEWLINE_MARKER,
};
pub use request::{dispatch, Operation};
pub use similarity::{
    levenshtein, similarity, similarity_report, similarity_report_with, similarity_with,
    SimilarityReport,
};
pub use structural_diff::{
    parse_tree, structural_diff, structural_diff_str, structural_diff_with, TreeChange, TreeDiff,
};
pub use table::AlignmentTable;
