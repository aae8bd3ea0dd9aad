//! Flatten duplicated nesting
//!
//! A directory named like its parent (`af/af`) is merged into the parent:
//! its entries move up one level and the emptied directory is removed.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::error::{TidyError, TidyResult};
use crate::core::model::{Action, ActionKind, Report};
use crate::core::paths::display_path;
use crate::core::render::RenderConfig;
use crate::core::util::same_content;
use crate::tasks::emit;
use crate::walker::{directories, ensure_dir, replace, start_report};

/// Merge every `x/x` directory under `root` into its parent `x`
pub fn flatten(root: &Path, apply: bool, force: bool) -> Report {
    let mut report = start_report(root, apply, force);
    if let Err(err) = ensure_dir(root) {
        report.push(err.to_action(root));
        return report;
    }

    for dir in directories(root, 1, None, &mut report) {
        if dir.symlink_metadata().is_err() {
            // Moved away by an earlier merge; a second run picks it up.
            debug!("{} no longer exists", dir.display());
            continue;
        }
        let Some(parent) = dir.parent() else {
            continue;
        };
        if dir.file_name().is_none() || dir.file_name() != parent.file_name() {
            continue;
        }
        debug!("merging {} into {}", dir.display(), parent.display());
        merge_into_parent(&dir, parent, apply, force, &mut report);
    }

    report
}

fn sorted_entries(dir: &Path) -> TidyResult<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| TidyError::io(dir, e))? {
        entries.push(entry.map_err(|e| TidyError::io(dir, e))?.path());
    }
    entries.sort();
    Ok(entries)
}

fn merge_into_parent(nested: &Path, parent: &Path, apply: bool, force: bool, report: &mut Report) {
    let entries = match sorted_entries(nested) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("{}", err);
            report.push(err.to_action(nested));
            return;
        }
    };

    let mut blocked = false;
    for src in entries {
        let Some(name) = src.file_name() else {
            continue;
        };
        let action = move_entry(&src, &parent.join(name), apply, force);
        blocked |= matches!(action.kind, ActionKind::Skip | ActionKind::Error);
        report.push(action);
    }

    let nested_display = display_path(nested);
    if blocked {
        report.push(Action::skip(nested_display, "not empty, left in place."));
        return;
    }
    if !apply {
        report.push(Action::remove_dir(nested_display));
        return;
    }
    match fs::remove_dir(nested) {
        Ok(()) => report.push(Action::remove_dir(nested_display).applied(true)),
        Err(e) => {
            warn!("cannot remove {}: {}", nested.display(), e);
            report.push(Action::error(nested_display, e.to_string()));
        }
    }
}

/// Move one entry of the nested directory up into the parent
fn move_entry(src: &Path, dst: &Path, apply: bool, force: bool) -> Action {
    let (src_display, dst_display) = (display_path(src), display_path(dst));
    let fail = |e: std::io::Error| failed(src, dst, e);

    let dst_meta = match dst.symlink_metadata() {
        Err(_) => {
            let action = Action::moved(src_display.clone(), dst_display.clone());
            if !apply {
                return action;
            }
            return match fs::rename(src, dst) {
                Ok(()) => action.applied(true),
                Err(e) => fail(e),
            };
        }
        Ok(meta) => meta,
    };

    if !dst_meta.is_file() || !src.is_file() {
        return Action::skip(dst_display, "exists and is not a regular file. Resolve manually.");
    }

    match same_content(src, dst) {
        Ok(true) => {
            let action = Action::delete(src_display.clone())
                .with_message(format!("identical duplicate of {}", dst_display));
            if !apply {
                return action;
            }
            match fs::remove_file(src) {
                Ok(()) => action.applied(true),
                Err(e) => fail(e),
            }
        }
        Ok(false) if force => {
            let action = Action::rename(src_display.clone(), dst_display.clone(), true);
            if !apply {
                return action;
            }
            match replace(src, dst, true) {
                Ok(()) => action.applied(true),
                Err(e) => fail(e),
            }
        }
        Ok(false) => Action::skip(dst_display, "exists. Use --force to overwrite."),
        Err(e) => fail(e),
    }
}

fn failed(src: &Path, dst: &Path, e: std::io::Error) -> Action {
    warn!("move {} failed: {}", src.display(), e);
    Action::error(display_path(src), e.to_string()).with_target(display_path(dst))
}

pub fn run_flatten(root: &Path, apply: bool, force: bool, config: RenderConfig) -> Result<()> {
    emit(&flatten(root, apply, force), config)
}
