//! Library interface for the vdl command line

pub mod config;

use anyhow::{Context, Result};
use config::VdlConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use vdl_core::{ir_json_schema, lower_with_stats, Program};

/// Lower the program at `input` and write the IR into `output_dir`.
///
/// Returns the path of the written file.
pub fn generate_ir(input: &Path, output_dir: &Path, config: &VdlConfig) -> Result<PathBuf> {
    config.validate()?;

    info!("Loading program from {}", input.display());
    let program = Program::from_path(input)
        .with_context(|| format!("Failed to load program: {}", input.display()))?;

    let (schema, stats) = lower_with_stats(&program, &config.build);
    info!(
        "Lowered {} types, {} enums and {} constants",
        schema.types.len(),
        schema.enums.len(),
        schema.constants.len()
    );
    if stats.cycles_broken > 0 || stats.depth_exceeded > 0 {
        info!(
            "{} constant cycles broken, {} sub-expressions cut at max depth {}",
            stats.cycles_broken, stats.depth_exceeded, config.build.max_depth
        );
    }

    let json = schema.to_json(&config.ir)?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;
    let path = output_dir.join(&config.ir.filename);
    fs::write(&path, json).with_context(|| format!("Failed to write IR: {}", path.display()))?;

    info!("Wrote IR to {}", path.display());
    Ok(path)
}

/// The IR JSON Schema, pretty-printed
pub fn render_schema() -> Result<String> {
    serde_json::to_string_pretty(&ir_json_schema()).context("Failed to encode IR JSON Schema")
}

pub fn write_schema(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(output, render_schema()?)
        .with_context(|| format!("Failed to write schema: {}", output.display()))?;

    info!("Wrote IR JSON Schema to {}", output.display());
    Ok(())
}
