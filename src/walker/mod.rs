//! Tree walker with rename rules
//!
//! Visits every directory under a root exactly once, asks a `RenameRule`
//! what to rename there, and reports one action per decision. A failure on
//! one file never stops the traversal.

pub mod rules;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::error::{TidyError, TidyResult};
use crate::core::model::{Action, ActionKind, Report};
use crate::core::paths::{display_path, is_case_only_change};

/// Traversal and mutation options shared by the rename tasks
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Perform changes; otherwise only report them (dry-run)
    pub apply: bool,
    /// Overwrite an existing destination
    pub force: bool,
    /// Shallowest directory depth to visit (root is 0)
    pub min_depth: usize,
    /// Deepest directory depth to visit; unbounded when `None`
    pub max_depth: Option<usize>,
}

impl WalkOptions {
    pub fn new(apply: bool, force: bool) -> Self {
        Self {
            apply,
            force,
            ..Default::default()
        }
    }

    /// Restrict the visited directories to depths `min..=max`
    pub fn depths(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_depth = min;
        self.max_depth = max;
        self
    }
}

/// What a rule wants done in one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    /// `(from, to)` file name pairs
    Renames(Vec<(String, String)>),
    /// Several candidates matched; the directory needs manual resolution
    Ambiguous(Vec<String>),
}

impl Proposal {
    pub fn none() -> Self {
        Proposal::Renames(Vec::new())
    }
}

/// A matching predicate plus a naming transform
pub trait RenameRule {
    /// Propose renames for the regular files of one directory
    fn propose(&self, dir: &Path, file_names: &[String]) -> Proposal;
}

/// Report header naming the root and the mode
pub fn start_report(root: &Path, apply: bool, force: bool) -> Report {
    let mode = if apply { "APPLY" } else { "DRY-RUN" };
    let force = if force { " (force overwrite)" } else { "" };
    Report::new()
        .with_header(format!("Scanning: {}", display_path(root)))
        .with_header(format!("Mode: {}{}", mode, force))
}

/// Report header for tasks that only read
pub fn scan_report(root: &Path) -> Report {
    Report::new().with_header(format!("Scanning: {}", display_path(root)))
}

/// Fail with `NotADirectory` unless `root` is an existing directory
pub fn ensure_dir(root: &Path) -> TidyResult<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(TidyError::NotADirectory(root.to_path_buf()))
    }
}

/// Directories under `root` within the depth bounds, top-down and sorted.
///
/// Unreadable entries are reported and left out.
pub fn directories(
    root: &Path,
    min_depth: usize,
    max_depth: Option<usize>,
    report: &mut Report,
) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).min_depth(min_depth).sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    let mut dirs = Vec::new();
    for entry in walker {
        match entry {
            Ok(e) if e.file_type().is_dir() => dirs.push(e.into_path()),
            Ok(_) => {}
            Err(err) => {
                let err = TidyError::from(err);
                warn!("{}", err);
                report.push(err.to_action(root));
            }
        }
    }
    dirs
}

/// Sorted names of the regular files directly inside `dir`
pub fn file_names(dir: &Path) -> TidyResult<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| TidyError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| TidyError::io(dir, e))?;
        let is_file = entry
            .file_type()
            .map_err(|e| TidyError::io(entry.path(), e))?
            .is_file();
        if !is_file {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!("skipping non UTF-8 name {:?} in {}", raw, dir.display()),
        }
    }
    names.sort();
    Ok(names)
}

/// Whether `name` ends in one of `extensions` (without dot, ASCII case-insensitive)
pub fn has_extension(name: &str, extensions: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// All regular files under `root` with one of `extensions`, directory by
/// directory in sorted order. Unreadable directories are reported and skipped.
pub fn files_with_extension(root: &Path, extensions: &[String], report: &mut Report) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in directories(root, 0, None, report) {
        match file_names(&dir) {
            Ok(names) => files.extend(
                names
                    .iter()
                    .filter(|name| has_extension(name, extensions))
                    .map(|name| dir.join(name)),
            ),
            Err(err) => {
                warn!("{}", err);
                report.push(err.to_action(&dir));
            }
        }
    }
    files
}

/// Apply `rule` to every directory under `root`
pub fn rename_tree(root: &Path, rule: &dyn RenameRule, options: &WalkOptions) -> Report {
    let mut report = start_report(root, options.apply, options.force);
    if let Err(err) = ensure_dir(root) {
        report.push(err.to_action(root));
        return report;
    }

    for dir in directories(root, options.min_depth, options.max_depth, &mut report) {
        debug!("visiting {}", dir.display());
        let mut names = match file_names(&dir) {
            Ok(names) => names,
            Err(err) => {
                warn!("{}", err);
                report.push(err.to_action(&dir));
                continue;
            }
        };

        match rule.propose(&dir, &names) {
            Proposal::Ambiguous(found) => {
                report.push(Action::skip(
                    display_path(&dir),
                    format!("has both [{}]. Resolve manually.", found.join(", ")),
                ));
            }
            Proposal::Renames(pairs) => {
                for (from, to) in pairs {
                    if let Some(action) = rename_file(&dir, &from, &to, &names, options) {
                        if matches!(action.kind, ActionKind::Rename | ActionKind::Overwrite) {
                            // Planned renames count too, so a dry-run sees the same collisions.
                            names.retain(|n| n != &from && n != &to);
                            names.push(to);
                        }
                        report.push(action);
                    }
                }
            }
        }
    }

    report
}

/// Rename `dir/from` to `dir/to`, honoring dry-run and overwrite.
///
/// Returns `None` when there is nothing to do (source missing, or source and
/// destination are the same path). `names` is the current directory listing,
/// including renames already made or planned in this directory; a destination
/// named there always collides.
pub fn rename_file(
    dir: &Path,
    from: &str,
    to: &str,
    names: &[String],
    options: &WalkOptions,
) -> Option<Action> {
    let src = dir.join(from);
    let dst = dir.join(to);

    if from == to || !src.is_file() {
        return None;
    }

    let listed = names.iter().any(|n| n == to);
    let exists = if is_case_only_change(from, to) {
        listed
    } else {
        listed || dst.symlink_metadata().is_ok()
    };

    if exists && !options.force {
        return Some(Action::skip(
            display_path(&dst),
            "exists. Use --force to overwrite.",
        ));
    }

    let action = Action::rename(display_path(&src), display_path(&dst), exists);
    if !options.apply {
        return Some(action);
    }

    match replace(&src, &dst, exists) {
        Ok(()) => Some(action.applied(true)),
        Err(e) => {
            warn!("rename {} failed: {}", src.display(), e);
            Some(
                Action::error(display_path(&src), e.to_string()).with_target(display_path(&dst)),
            )
        }
    }
}

/// Move `src` onto `dst`. The source is only gone once the rename succeeded.
pub fn replace(src: &Path, dst: &Path, overwrite: bool) -> io::Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(_) if overwrite && dst.is_file() => {
            // Platforms that refuse to rename over an existing file.
            fs::remove_file(dst)?;
            fs::rename(src, dst)
        }
        Err(e) => Err(e),
    }
}
