//! Unified Action Model
//!
//! Every task maps what it did (or would do) to this model before rendering
//! output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The kind of action taken on a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Rename,
    Overwrite,
    Move,
    Delete,
    RemoveDir,
    Modify,
    Skip,
    Error,
    Finding,
    Entry,
}

impl ActionKind {
    /// Tag printed in text output, e.g. `RENAME` in `[RENAME] a -> b`
    pub fn tag(self) -> &'static str {
        match self {
            ActionKind::Rename => "RENAME",
            ActionKind::Overwrite => "OVERWRITE",
            ActionKind::Move => "MOVE",
            ActionKind::Delete => "DELETE",
            ActionKind::RemoveDir => "REMOVE DIR",
            ActionKind::Modify => "MODIFY",
            ActionKind::Skip => "SKIP",
            ActionKind::Error => "ERROR",
            ActionKind::Finding => "FOUND",
            ActionKind::Entry => "ENTRY",
        }
    }

    /// Whether this kind changes the filesystem (and therefore has a dry-run form)
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            ActionKind::Rename
                | ActionKind::Overwrite
                | ActionKind::Move
                | ActionKind::Delete
                | ActionKind::RemoveDir
                | ActionKind::Modify
        )
    }
}

/// One reported outcome for one path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,

    /// Source path (or the inspected path for read-only tasks)
    pub path: String,

    /// Destination path for renames and moves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Human-readable detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Depth below the traversal root (tree entries)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,

    /// Whether the change was performed; false means dry-run
    pub applied: bool,
}

impl Action {
    fn new(kind: ActionKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            target: None,
            message: None,
            depth: None,
            applied: false,
        }
    }

    /// A rename (or overwrite) from `path` to `target`
    pub fn rename(path: impl Into<String>, target: impl Into<String>, overwrite: bool) -> Self {
        let kind = if overwrite {
            ActionKind::Overwrite
        } else {
            ActionKind::Rename
        };
        Self::new(kind, path).with_target(target)
    }

    pub fn moved(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(ActionKind::Move, path).with_target(target)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(ActionKind::Delete, path)
    }

    pub fn remove_dir(path: impl Into<String>) -> Self {
        Self::new(ActionKind::RemoveDir, path)
    }

    pub fn modify(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ActionKind::Modify, path).with_message(message)
    }

    pub fn skip(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ActionKind::Skip, path).with_message(message)
    }

    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ActionKind::Error, path).with_message(message)
    }

    pub fn finding(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ActionKind::Finding, path).with_message(message)
    }

    /// A line of a directory listing
    pub fn entry(path: impl Into<String>, depth: usize) -> Self {
        let mut action = Self::new(ActionKind::Entry, path);
        action.depth = Some(depth);
        action
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Mark whether the change was really performed
    pub fn applied(mut self, applied: bool) -> Self {
        self.applied = applied;
        self
    }

    /// A planned mutation that was not performed
    pub fn is_dry_run(&self) -> bool {
        self.kind.is_mutation() && !self.applied
    }
}

/// Ordered list of actions produced by one task invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    /// Header lines (`Scanning: ...`, `Mode: ...`)
    #[serde(skip)]
    pub header: Vec<String>,

    pub actions: Vec<Action>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions of the given kind
    pub fn of_kind(&self, kind: ActionKind) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(move |a| a.kind == kind)
    }

    /// Count actions per kind; tree entries are not counted
    pub fn summary(&self) -> Summary {
        let mut counts = BTreeMap::new();
        for action in &self.actions {
            if action.kind == ActionKind::Entry {
                continue;
            }
            *counts.entry(action.kind).or_insert(0) += 1;
        }
        Summary { counts }
    }
}

/// Per-kind action counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub counts: BTreeMap<ActionKind, usize>,
}

impl Summary {
    #[cfg(test)]
    pub fn count(&self, kind: ActionKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.counts.is_empty() {
            return write!(f, "Summary: nothing to do");
        }
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(kind, n)| format!("{} {}", n, kind.tag().to_lowercase()))
            .collect();
        write!(f, "Summary: {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_action() {
        let action = Action::rename("a/commonContent.json", "a/text.json", false);
        assert_eq!(action.kind, ActionKind::Rename);
        assert_eq!(action.target.as_deref(), Some("a/text.json"));
        assert!(action.is_dry_run());
        assert!(!action.applied(true).is_dry_run());
    }

    #[test]
    fn test_overwrite_action() {
        let action = Action::rename("a", "b", true);
        assert_eq!(action.kind, ActionKind::Overwrite);
    }

    #[test]
    fn test_skip_is_never_dry_run() {
        let action = Action::skip("x", "exists");
        assert!(!action.is_dry_run());
    }

    #[test]
    fn test_summary_counts() {
        let mut report = Report::new();
        report.push(Action::rename("a", "b", false).applied(true));
        report.push(Action::rename("c", "d", false).applied(true));
        report.push(Action::skip("e", "exists"));
        report.push(Action::entry("root/", 0));

        let summary = report.summary();
        assert_eq!(summary.count(ActionKind::Rename), 2);
        assert_eq!(summary.count(ActionKind::Skip), 1);
        assert_eq!(summary.count(ActionKind::Entry), 0);
        assert_eq!(summary.to_string(), "Summary: 2 rename, 1 skip");
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(Report::new().summary().to_string(), "Summary: nothing to do");
    }

    #[test]
    fn test_action_serializes_snake_case() {
        let action = Action::remove_dir("af/af").applied(true);
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"kind\":\"remove_dir\""));
        assert!(!json.contains("target"));
    }
}
