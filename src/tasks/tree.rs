//! Directory tree listing

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::core::error::{TidyError, TidyResult};
use crate::core::model::{Action, Report};
use crate::core::render::RenderConfig;
use crate::tasks::emit;
use crate::walker::ensure_dir;

pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Sorted (files, subdirectories) names of one directory
fn split_entries(dir: &Path) -> TidyResult<(Vec<String>, Vec<String>)> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| TidyError::io(dir, e))? {
        let entry = entry.map_err(|e| TidyError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => dirs.push(name),
            _ => files.push(name),
        }
    }
    files.sort();
    dirs.sort();
    Ok((files, dirs))
}

/// List `dir` at `depth`: its name, its files, then its subdirectories
fn walk(dir: &Path, name: &str, depth: usize, max_depth: usize, report: &mut Report) {
    report.push(Action::entry(format!("{}/", name), depth));

    let (files, dirs) = match split_entries(dir) {
        Ok(split) => split,
        Err(err) => {
            warn!("{}", err);
            report.push(err.to_action(dir));
            return;
        }
    };

    for file in files {
        report.push(Action::entry(file, depth + 1));
    }
    if depth >= max_depth {
        return;
    }
    for sub in dirs {
        walk(&dir.join(&sub), &sub, depth + 1, max_depth, report);
    }
}

/// Tree of `root`, descending at most `max_depth` directory levels
pub fn tree(root: &Path, max_depth: usize) -> Report {
    let mut report = Report::new();
    if let Err(err) = ensure_dir(root) {
        report.push(err.to_action(root));
        return report;
    }

    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.to_string_lossy().into_owned());
    walk(root, &name, 0, max_depth, &mut report);
    report
}

pub fn run_tree(root: &Path, max_depth: usize, config: RenderConfig) -> Result<()> {
    emit(&tree(root, max_depth), config)
}
