//! Rename tasks built on the tree walker

use anyhow::Result;
use std::path::Path;

use crate::core::model::Report;
use crate::core::render::RenderConfig;
use crate::tasks::emit;
use crate::walker::rules::{CandidateRule, DbsRule, ExactNameRule, SuffixRule};
use crate::walker::{rename_tree, WalkOptions};

/// Names merged into `text.json`, in priority of reporting
pub const COMMON_CANDIDATES: [&str; 2] = ["commonInterface.json", "commonContent.json"];
pub const TEXT_TARGET: &str = "text.json";

/// Default exact rename (video structure files with a stray capital)
pub const JVIDEO_FROM: &str = "jVideoStructured.json";
pub const JVIDEO_TO: &str = "jvideoStructured.json";

/// `commonInterface.json` / `commonContent.json` -> `text.json`, recursively
pub fn common_to_text(root: &Path, apply: bool, force: bool) -> Report {
    let rule = CandidateRule::new(COMMON_CANDIDATES, TEXT_TARGET);
    rename_tree(root, &rule, &WalkOptions::new(apply, force))
}

/// Exact file name rename, recursively
pub fn rename_exact(root: &Path, from: &str, to: &str, apply: bool, force: bool) -> Report {
    let rule = ExactNameRule::new(from, to);
    rename_tree(root, &rule, &WalkOptions::new(apply, force))
}

/// `*.htm` -> `*.html`, recursively
pub fn htm_to_html(root: &Path, apply: bool, force: bool) -> Report {
    let rule = SuffixRule::new(".htm", ".html");
    rename_tree(root, &rule, &WalkOptions::new(apply, force))
}

/// `*Structured.json` -> `*.json` inside each immediate subdirectory of root
pub fn strip_structured(root: &Path, apply: bool, force: bool) -> Report {
    let rule = SuffixRule::new("Structured.json", ".json");
    rename_tree(
        root,
        &rule,
        &WalkOptions::new(apply, force).depths(1, Some(1)),
    )
}

/// `DBS*` -> `Dbs*` and `Leadership` -> `Lead`, in root only
pub fn rename_dbs(root: &Path, apply: bool, force: bool) -> Report {
    rename_tree(
        root,
        &DbsRule,
        &WalkOptions::new(apply, force).depths(0, Some(0)),
    )
}

pub fn run_common_to_text(root: &Path, apply: bool, force: bool, config: RenderConfig) -> Result<()> {
    emit(&common_to_text(root, apply, force), config)
}

pub fn run_rename_exact(
    root: &Path,
    from: &str,
    to: &str,
    apply: bool,
    force: bool,
    config: RenderConfig,
) -> Result<()> {
    emit(&rename_exact(root, from, to, apply, force), config)
}

pub fn run_htm_to_html(root: &Path, apply: bool, force: bool, config: RenderConfig) -> Result<()> {
    emit(&htm_to_html(root, apply, force), config)
}

pub fn run_strip_structured(
    root: &Path,
    apply: bool,
    force: bool,
    config: RenderConfig,
) -> Result<()> {
    emit(&strip_structured(root, apply, force), config)
}

pub fn run_rename_dbs(root: &Path, apply: bool, force: bool, config: RenderConfig) -> Result<()> {
    emit(&rename_dbs(root, apply, force), config)
}
