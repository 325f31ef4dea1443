//! Foundation types for cmpkit.
//!
//! This crate provides the value types shared by the comparison engines and
//! the command-line surface. Every other cmpkit crate depends on
//! `cmpkit-types`.
//!
//! # Key Types
//!
//! - [`TreePath`] / [`PathSegment`] — Location of a node inside a JSON-like tree
//! - [`PathStyle`] — How a [`TreePath`] is rendered to (and parsed from) text
//! - [`ChangeKind`] — Tag shared by line operations and tree changes

pub mod error;
pub mod kind;
pub mod path;

pub use error::TypeError;
pub use kind::ChangeKind;
pub use path::{PathSegment, PathStyle, TreePath};
