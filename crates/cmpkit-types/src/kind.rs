use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a single difference entry.
///
/// Line operations use `Equal`, `Added` and `Removed`; tree changes use
/// `Added`, `Removed` and `Changed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Equal,
    Added,
    Removed,
    Changed,
}

impl ChangeKind {
    /// The lowercase wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
        }
    }

    /// Returns `true` for every kind except `Equal`.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Equal)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
