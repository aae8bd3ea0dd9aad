//! Delete named files from each language folder

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::core::model::{Action, Report};
use crate::core::paths::display_path;
use crate::core::render::RenderConfig;
use crate::tasks::emit;
use crate::walker::{directories, ensure_dir, start_report};

/// Study bundles that no longer live in the language folders
pub const DEFAULT_DELETE: [&str; 4] = ["dbs.json", "lead.json", "life.json", "video.json"];

/// Delete each of `names` from every immediate subdirectory of `root`
pub fn delete_named(root: &Path, names: &[String], apply: bool) -> Report {
    let mut report = start_report(root, apply, false);
    if let Err(err) = ensure_dir(root) {
        report.push(err.to_action(root));
        return report;
    }

    let mut names = names.to_vec();
    names.sort();
    names.dedup();

    for dir in directories(root, 1, Some(1), &mut report) {
        for name in &names {
            let path = dir.join(name);
            let shown = display_path(&path);

            if !path.is_file() {
                report.push(Action::skip(shown, "not found"));
                continue;
            }
            if !apply {
                report.push(Action::delete(shown));
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => report.push(Action::delete(shown).applied(true)),
                Err(e) => {
                    warn!("cannot delete {}: {}", path.display(), e);
                    report.push(Action::error(shown, e.to_string()));
                }
            }
        }
    }

    report
}

pub fn run_delete(root: &Path, names: &[String], apply: bool, config: RenderConfig) -> Result<()> {
    emit(&delete_named(root, names, apply), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ActionKind;
    use tempfile::tempdir;

    fn defaults() -> Vec<String> {
        DEFAULT_DELETE.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_delete_in_language_folders() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("en/nested")).unwrap();
        fs::write(temp.path().join("en/dbs.json"), "{}").unwrap();
        fs::write(temp.path().join("en/text.json"), "{}").unwrap();
        fs::write(temp.path().join("en/nested/dbs.json"), "{}").unwrap();
        fs::write(temp.path().join("dbs.json"), "{}").unwrap();

        let report = delete_named(temp.path(), &defaults(), true);

        assert_eq!(report.summary().count(ActionKind::Delete), 1);
        // lead/life/video missing in en; en/nested is not a language folder
        assert_eq!(report.summary().count(ActionKind::Skip), 3);
        assert!(!temp.path().join("en/dbs.json").exists());
        assert!(temp.path().join("en/text.json").exists());
        assert!(temp.path().join("en/nested/dbs.json").exists());
        assert!(temp.path().join("dbs.json").exists());
    }

    #[test]
    fn test_delete_dry_run() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("fr")).unwrap();
        fs::write(temp.path().join("fr/video.json"), "{}").unwrap();

        let report = delete_named(temp.path(), &["video.json".to_string()], false);

        assert_eq!(report.len(), 1);
        assert!(report.actions[0].is_dry_run());
        assert!(temp.path().join("fr/video.json").exists());
    }

    #[test]
    fn test_delete_ignores_directories_with_target_name() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("fr/life.json")).unwrap();

        let report = delete_named(temp.path(), &["life.json".to_string()], true);

        assert_eq!(report.summary().count(ActionKind::Skip), 1);
        assert!(temp.path().join("fr/life.json").is_dir());
    }
}
