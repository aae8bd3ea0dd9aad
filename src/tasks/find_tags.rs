//! Count tags in HTML files and report the ones with too many

use anyhow::{anyhow, Result};
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::error::TidyError;
use crate::core::model::{Action, Report};
use crate::core::paths::display_path;
use crate::core::render::RenderConfig;
use crate::tasks::emit;
use crate::walker::{ensure_dir, files_with_extension, scan_report};

pub const HTML_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// Number of elements matching `selector` in an HTML document
pub fn count_tags(html: &str, selector: &Selector) -> usize {
    Html::parse_document(html).select(selector).count()
}

fn tags_message(count: usize, tag: &str) -> String {
    let noun = if count == 1 { "tag" } else { "tags" };
    format!("has {} <{}> {}.", count, tag, noun)
}

/// Report every HTML file under `root` with more than `more_than` `tag` elements
pub fn find_tags(root: &Path, tag: &str, more_than: usize) -> Result<Report> {
    let selector =
        Selector::parse(tag).map_err(|e| anyhow!("Invalid tag selector '{}': {}", tag, e))?;

    let mut report = scan_report(root);
    if let Err(err) = ensure_dir(root) {
        report.push(err.to_action(root));
        return Ok(report);
    }

    let extensions: Vec<String> = HTML_EXTENSIONS.iter().map(|e| e.to_string()).collect();
    for path in files_with_extension(root, &extensions, &mut report) {
        let html = match fs::read(&path) {
            // Parsing is best effort; invalid UTF-8 becomes replacement characters.
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("cannot read {}: {}", path.display(), e);
                report.push(TidyError::io(&path, e).to_action(&path));
                continue;
            }
        };

        let count = count_tags(&html, &selector);
        debug!("{}: {} <{}>", path.display(), count, tag);
        if count > more_than {
            report.push(Action::finding(display_path(&path), tags_message(count, tag)));
        }
    }

    Ok(report)
}

pub fn run_find_tags(root: &Path, tag: &str, more_than: usize, config: RenderConfig) -> Result<()> {
    emit(&find_tags(root, tag, more_than)?, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ActionKind;
    use tempfile::tempdir;

    #[test]
    fn test_count_tags() {
        let selector = Selector::parse("h3").unwrap();
        let html = "<html><body><h3>One</h3><p>x</p><h3>Two</h3><h2>No</h2></body></html>";
        assert_eq!(count_tags(html, &selector), 2);
    }

    #[test]
    fn test_count_tags_malformed_html() {
        let selector = Selector::parse("h3").unwrap();
        assert_eq!(count_tags("<h3>open<h3>again", &selector), 2);
        assert_eq!(count_tags("", &selector), 0);
    }

    #[test]
    fn test_tags_message() {
        assert_eq!(tags_message(3, "h3"), "has 3 <h3> tags.");
        assert_eq!(tags_message(1, "h2"), "has 1 <h2> tag.");
    }

    #[test]
    fn test_find_tags_reports_only_over_threshold() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("af")).unwrap();
        fs::write(temp.path().join("af/1.html"), "<h3>a</h3><h3>b</h3>").unwrap();
        fs::write(temp.path().join("af/2.htm"), "<h3>a</h3>").unwrap();
        fs::write(temp.path().join("af/3.txt"), "<h3>a</h3><h3>b</h3>").unwrap();

        let report = find_tags(temp.path(), "h3", 1).unwrap();

        assert_eq!(report.len(), 1);
        let finding = &report.actions[0];
        assert_eq!(finding.kind, ActionKind::Finding);
        assert!(finding.path.ends_with("1.html"));
        assert_eq!(finding.message.as_deref(), Some("has 2 <h3> tags."));
    }

    #[test]
    fn test_find_tags_never_modifies() {
        let temp = tempdir().unwrap();
        let content = "<h3>a</h3><h3>b</h3><h3>c</h3>";
        fs::write(temp.path().join("1.html"), content).unwrap();

        find_tags(temp.path(), "h3", 1).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("1.html")).unwrap(),
            content
        );
    }

    #[test]
    fn test_find_tags_invalid_selector() {
        let temp = tempdir().unwrap();
        assert!(find_tags(temp.path(), "h3[", 1).is_err());
    }
}
