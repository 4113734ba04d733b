//! Configuration for lowering and IR emission

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Default nesting limit for literal resolution and spread flattening.
///
/// Each value level costs up to three JSON levels in the emitted IR, so this
/// keeps documents readable under serde_json's recursion limit of 128.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default file name for the emitted IR document
pub const DEFAULT_IR_FILENAME: &str = "ir.json";

/// Options passed through the lowering pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Maximum recursion depth for nested literals and spread chains
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_depth == 0 {
            return Err(CoreError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for writing the IR as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitConfig {
    /// Emit compact JSON instead of two-space indentation
    #[serde(default)]
    pub minify: bool,
    /// Output file name
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    DEFAULT_IR_FILENAME.to_string()
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            minify: false,
            filename: default_filename(),
        }
    }
}

impl EmitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Set the output file name; an empty name keeps the default
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        if !filename.is_empty() {
            self.filename = filename;
        }
        self
    }
}
