//! Renderer module
//!
//! Renders a Report to different output formats: text, jsonl, json, md

use colored::Colorize;
use std::io::Write;

use crate::core::model::{Action, ActionKind, Report};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    #[cfg(test)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[cfg(test)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a report to a string
    pub fn render(&self, report: &Report) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(report),
            OutputFormat::Jsonl => self.render_jsonl(report),
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Markdown => self.render_markdown(report),
        }
    }

    /// Render to a writer, followed by a newline
    pub fn render_to<W: Write>(&self, report: &Report, mut writer: W) -> std::io::Result<()> {
        let output = self.render(report);
        if output.is_empty() {
            return Ok(());
        }
        writer.write_all(output.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }

    /// Render as human-readable lines with a trailing summary
    fn render_text(&self, report: &Report) -> String {
        let mut lines: Vec<String> = report.header.clone();
        lines.extend(report.actions.iter().map(text_line));

        let summary = report.summary();
        let listing_only = summary.is_empty() && report.of_kind(ActionKind::Entry).next().is_some();
        if !listing_only {
            lines.push(summary.to_string());
        }

        lines.join("\n")
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, report: &Report) -> String {
        report
            .actions
            .iter()
            .filter_map(|action| {
                if self.config.pretty {
                    serde_json::to_string_pretty(action).ok()
                } else {
                    serde_json::to_string(action).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, report: &Report) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&report.actions).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&report.actions).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown, grouped by outcome
    fn render_markdown(&self, report: &Report) -> String {
        let mut output = String::new();

        let entries: Vec<&Action> = report.of_kind(ActionKind::Entry).collect();
        if !entries.is_empty() {
            output.push_str("## Tree\n\n```\n");
            for entry in entries {
                output.push_str(&tree_line(entry));
                output.push('\n');
            }
            output.push_str("```\n\n");
        }

        let sections = [
            ("Errors", vec![ActionKind::Error]),
            ("Skipped", vec![ActionKind::Skip]),
            ("Findings", vec![ActionKind::Finding]),
            (
                "Changes",
                vec![
                    ActionKind::Rename,
                    ActionKind::Overwrite,
                    ActionKind::Move,
                    ActionKind::Delete,
                    ActionKind::RemoveDir,
                    ActionKind::Modify,
                ],
            ),
        ];

        for (title, kinds) in sections {
            let items: Vec<&Action> = report
                .actions
                .iter()
                .filter(|a| kinds.contains(&a.kind))
                .collect();
            if items.is_empty() {
                continue;
            }
            output.push_str(&format!("## {}\n\n", title));
            for item in items {
                self.render_item_md(&mut output, item);
            }
            output.push('\n');
        }

        let summary = report.summary();
        if !summary.is_empty() {
            output.push_str(&format!("_{}_\n", summary));
        }

        output
    }

    fn render_item_md(&self, output: &mut String, item: &Action) {
        output.push_str(&format!("- **{}**", tag_for(item)));
        output.push_str(&format!(" `{}`", item.path));
        if let Some(target) = &item.target {
            output.push_str(&format!(" → `{}`", target));
        }
        if let Some(message) = &item.message {
            output.push_str(&format!(": {}", message));
        }
        output.push('\n');
    }
}

fn tag_for(action: &Action) -> String {
    if action.is_dry_run() {
        format!("DRY-RUN {}", action.kind.tag())
    } else {
        action.kind.tag().to_string()
    }
}

fn tree_line(action: &Action) -> String {
    format!("{}{}", " ".repeat(4 * action.depth.unwrap_or(0)), action.path)
}

/// One text line for an action, e.g. `[DRY-RUN RENAME] a -> b`
pub fn text_line(action: &Action) -> String {
    if action.kind == ActionKind::Entry {
        return tree_line(action);
    }

    let tag = format!("[{}]", tag_for(action));
    let tag = match action.kind {
        _ if action.is_dry_run() => tag.cyan(),
        ActionKind::Error => tag.red().bold(),
        ActionKind::Skip => tag.yellow(),
        ActionKind::Finding => tag.magenta(),
        _ => tag.green(),
    };

    let mut line = format!("{} {}", tag, action.path);
    if let Some(target) = &action.target {
        line.push_str(&format!(" -> {}", target));
    }
    if let Some(message) = &action.message {
        match action.kind {
            ActionKind::Error => line.push_str(&format!(": {}", message)),
            ActionKind::Skip | ActionKind::Finding => line.push_str(&format!(" {}", message)),
            _ => line.push_str(&format!(" ({})", message)),
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_text_line_rename() {
        plain();
        let action = Action::rename("a/commonContent.json", "a/text.json", false).applied(true);
        assert_eq!(
            text_line(&action),
            "[RENAME] a/commonContent.json -> a/text.json"
        );
    }

    #[test]
    fn test_text_line_dry_run() {
        plain();
        let action = Action::rename("a", "b", true);
        assert_eq!(text_line(&action), "[DRY-RUN OVERWRITE] a -> b");
    }

    #[test]
    fn test_text_line_skip() {
        plain();
        let action = Action::skip("a/text.json", "exists. Use --force to overwrite.");
        assert_eq!(
            text_line(&action),
            "[SKIP] a/text.json exists. Use --force to overwrite."
        );
    }

    #[test]
    fn test_text_line_error() {
        plain();
        let action = Action::error("a", "permission denied").with_target("b");
        assert_eq!(text_line(&action), "[ERROR] a -> b: permission denied");
    }

    #[test]
    fn test_text_line_modify() {
        plain();
        let action = Action::modify("x.json", "2 replacements").applied(true);
        assert_eq!(text_line(&action), "[MODIFY] x.json (2 replacements)");
    }

    #[test]
    fn test_text_line_entry() {
        let action = Action::entry("file.txt", 2);
        assert_eq!(text_line(&action), "        file.txt");
    }

    #[test]
    fn test_render_text_header_and_summary() {
        plain();
        let mut report = Report::new()
            .with_header("Scanning: /tmp/x")
            .with_header("Mode: DRY-RUN");
        report.push(Action::rename("a", "b", false));

        let output = Renderer::new(OutputFormat::Text).render(&report);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Scanning: /tmp/x");
        assert_eq!(lines[1], "Mode: DRY-RUN");
        assert_eq!(lines[2], "[DRY-RUN RENAME] a -> b");
        assert_eq!(lines[3], "Summary: 1 rename");
    }

    #[test]
    fn test_render_text_tree_has_no_summary() {
        let mut report = Report::new();
        report.push(Action::entry("root/", 0));
        report.push(Action::entry("a.txt", 1));

        let output = Renderer::new(OutputFormat::Text).render(&report);
        assert_eq!(output, "root/\n    a.txt");
    }

    #[test]
    fn test_render_jsonl() {
        let mut report = Report::new();
        report.push(Action::delete("a/dbs.json").applied(true));
        report.push(Action::delete("b/dbs.json").applied(true));

        let output = Renderer::new(OutputFormat::Jsonl).render(&report);
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("a/dbs.json"));
    }

    #[test]
    fn test_render_json() {
        let mut report = Report::new();
        report.push(Action::finding("x.html", "has 2 <h3> tags"));

        let output = Renderer::new(OutputFormat::Json).render(&report);
        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
    }

    #[test]
    fn test_render_markdown_sections() {
        let mut report = Report::new();
        report.push(Action::error("bad.json", "invalid JSON"));
        report.push(Action::rename("a", "b", false).applied(true));

        let output = Renderer::new(OutputFormat::Markdown).render(&report);
        assert!(output.contains("## Errors"));
        assert!(output.contains("## Changes"));
        assert!(output.find("## Errors") < output.find("## Changes"));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("raw".parse::<OutputFormat>().is_err());
    }
}
