use std::path::Path;

use serde::{Deserialize, Serialize};

use cmpkit_types::PathStyle;

use crate::error::{DiffError, DiffResult};

/// Options shared by the comparison engines.
///
/// Every field has a default, so a TOML file only needs to name what it
/// overrides:
///
/// ```toml
/// path_style = "bracket"
/// similarity_precision = 2
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// How structural diff paths are rendered.
    pub path_style: PathStyle,
    /// Decimal places kept in similarity scores.
    pub similarity_precision: u32,
    /// Depth below which the structural diff stops descending and compares
    /// whole subtrees. `None` means unbounded.
    pub max_depth: Option<usize>,
    /// Unchanged lines kept around each change when grouping hunks.
    pub context_lines: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            path_style: PathStyle::Dot,
            similarity_precision: Self::DEFAULT_PRECISION,
            max_depth: None,
            context_lines: 3,
        }
    }
}

impl DiffConfig {
    pub const DEFAULT_PRECISION: u32 = 4;
    pub const MAX_PRECISION: u32 = 12;

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> DiffResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| DiffError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> DiffResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> DiffResult<()> {
        if !(1..=Self::MAX_PRECISION).contains(&self.similarity_precision) {
            return Err(DiffError::Config(format!(
                "similarity_precision must be between 1 and {}, got {}",
                Self::MAX_PRECISION,
                self.similarity_precision
            )));
        }
        if self.max_depth == Some(0) {
            return Err(DiffError::Config("max_depth must be positive".into()));
        }
        Ok(())
    }

    pub fn with_path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }
}
