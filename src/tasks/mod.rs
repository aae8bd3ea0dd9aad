//! Tasks module - One maintenance task per concern
//!
//! Provides:
//! - rename: candidate, exact, suffix and study-name renames
//! - flatten: merge `x/x` nesting into `x`
//! - delete: drop named files from language folders
//! - replace_json: regex find/replace in JSON files
//! - find_tags: HTML tag census
//! - tree: directory tree listing

pub mod delete;
pub mod find_tags;
pub mod flatten;
pub mod rename;
pub mod replace_json;
pub mod tree;

use anyhow::{Context, Result};

use crate::core::model::Report;
use crate::core::render::{RenderConfig, Renderer};

/// Render a finished report to stdout
pub fn emit(report: &Report, config: RenderConfig) -> Result<()> {
    let renderer = Renderer::with_config(config);
    let stdout = std::io::stdout();
    renderer
        .render_to(report, stdout.lock())
        .context("Failed to write report to stdout")
}
