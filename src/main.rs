//! treetidy - maintenance tasks for translation content trees
//!
//! treetidy provides:
//! - Pattern renames (candidate names, exact names, suffixes, study prefixes)
//! - Flattening of duplicated `x/x` nesting
//! - Named-file deletion in language folders
//! - Regex find/replace inside JSON files
//! - HTML tag census and directory tree listing
//! - Unified output format (text/jsonl/json/md)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod tasks;
mod walker;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
