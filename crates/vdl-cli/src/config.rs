//! `vdl.toml` project configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;
use vdl_core::{BuildConfig, EmitConfig};

/// Default configuration file name, looked up next to the input program
pub const CONFIG_FILE_NAME: &str = "vdl.toml";

/// Contents of `vdl.toml`
///
/// ```toml
/// [build]
/// max_depth = 64
///
/// [ir]
/// minify = true
/// filename = "schema-ir.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VdlConfig {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub ir: EmitConfig,
}

impl VdlConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load `path` if given, else `vdl.toml` in `dir` if present, else defaults
    pub fn load(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!("Using config file {}", candidate.display());
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command line overrides; a flag can only turn minification on
    pub fn with_overrides(mut self, minify: bool, max_depth: Option<usize>) -> Self {
        if minify {
            self.ir.minify = true;
        }
        if let Some(max_depth) = max_depth {
            self.build.max_depth = max_depth;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.build.validate().context("Invalid [build] section")?;
        Ok(())
    }
}
