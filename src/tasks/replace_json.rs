//! Regex find/replace inside JSON files
//!
//! The text is substituted in place and written back verbatim; files are
//! parsed only to refuse touching (or producing) invalid JSON.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::core::error::TidyError;
use crate::core::model::{Action, Report};
use crate::core::paths::display_path;
use crate::core::render::RenderConfig;
use crate::core::util::plural;
use crate::tasks::emit;
use crate::walker::{ensure_dir, files_with_extension, start_report};

/// One `pattern -> replacement` substitution
#[derive(Debug, Clone)]
pub struct Replacement {
    pattern: Regex,
    replacement: String,
}

impl Replacement {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, TidyError> {
        let regex = Regex::new(pattern)
            .map_err(|e| TidyError::InvalidReplacement(format!("{}: {}", pattern, e)))?;
        Ok(Self {
            pattern: regex,
            replacement: replacement.into(),
        })
    }
}

impl FromStr for Replacement {
    type Err = TidyError;

    /// Parse `PATTERN=REPLACEMENT`, splitting at the first `=`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pattern, replacement) = s
            .split_once('=')
            .ok_or_else(|| TidyError::InvalidReplacement(s.to_string()))?;
        if pattern.is_empty() {
            return Err(TidyError::InvalidReplacement(s.to_string()));
        }
        Replacement::new(pattern, replacement)
    }
}

/// Key renames applied to the translation bundles
static DEFAULT_REPLACEMENTS: Lazy<Vec<Replacement>> = Lazy::new(|| {
    [
        (r#""lookback""#, r#""look_back""#),
        (r#""lookup""#, r#""look_up""#),
        (r#""lookforward""#, r#""look_forward""#),
    ]
    .into_iter()
    .map(|(p, r)| Replacement::new(p, r).expect("Invalid default replacement"))
    .collect()
});

pub fn default_replacements() -> Vec<Replacement> {
    DEFAULT_REPLACEMENTS.clone()
}

/// Apply every replacement in order; returns the new text and match count
pub fn substitute(content: &str, replacements: &[Replacement]) -> (String, usize) {
    let mut text = content.to_string();
    let mut count = 0;
    for r in replacements {
        let matches = r.pattern.find_iter(&text).count();
        if matches > 0 {
            text = r
                .pattern
                .replace_all(&text, r.replacement.as_str())
                .into_owned();
            count += matches;
        }
    }
    (text, count)
}

const BOM: &str = "\u{feff}";

/// Substitute inside one file. `None` when nothing matched.
fn process_file(path: &Path, replacements: &[Replacement], apply: bool) -> Option<Action> {
    let shown = display_path(path);

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("cannot read {}: {}", path.display(), e);
            return Some(TidyError::io(path, e).to_action(path));
        }
    };

    // A leading byte order mark is not JSON; keep it aside and write it back.
    let (bom, body) = match content.strip_prefix(BOM) {
        Some(rest) => (BOM, rest),
        None => ("", content.as_str()),
    };

    if let Err(e) = serde_json::from_str::<serde_json::Value>(body) {
        return Some(Action::error(shown, TidyError::InvalidJson(e).to_string()));
    }

    let (updated, count) = substitute(body, replacements);
    if count == 0 || updated == body {
        debug!("no changes in {}", path.display());
        return None;
    }

    if let Err(e) = serde_json::from_str::<serde_json::Value>(&updated) {
        return Some(Action::error(shown, TidyError::BrokenJson(e).to_string()));
    }

    let action = Action::modify(shown.clone(), plural(count, "replacement"));
    if !apply {
        return Some(action);
    }
    match fs::write(path, format!("{}{}", bom, updated)) {
        Ok(()) => Some(action.applied(true)),
        Err(e) => {
            warn!("cannot write {}: {}", path.display(), e);
            Some(Action::error(shown, e.to_string()))
        }
    }
}

/// Run `replacements` over every file with one of `extensions` under `root`
pub fn replace_json(
    root: &Path,
    extensions: &[String],
    replacements: &[Replacement],
    apply: bool,
) -> Report {
    let mut report = start_report(root, apply, false);
    if let Err(err) = ensure_dir(root) {
        report.push(err.to_action(root));
        return report;
    }

    for path in files_with_extension(root, extensions, &mut report) {
        debug!("processing {}", path.display());
        if let Some(action) = process_file(&path, replacements, apply) {
            report.push(action);
        }
    }

    report
}

pub fn run_replace_json(
    root: &Path,
    extensions: &[String],
    replacements: &[Replacement],
    apply: bool,
    config: RenderConfig,
) -> Result<()> {
    emit(&replace_json(root, extensions, replacements, apply), config)
}
