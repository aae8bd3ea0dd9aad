//! Per-item failures
//!
//! None of these abort a traversal: they are turned into `ERROR` actions
//! and the task moves on to the next item.

use std::path::{Path, PathBuf};

use crate::core::model::Action;
use crate::core::paths::display_path;

#[derive(thiserror::Error, Debug)]
pub enum TidyError {
    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read directory entry: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid JSON, file skipped: {0}")]
    InvalidJson(serde_json::Error),

    #[error("replacement would produce invalid JSON, file left untouched: {0}")]
    BrokenJson(serde_json::Error),

    #[error("invalid replacement '{0}', expected PATTERN=REPLACEMENT")]
    InvalidReplacement(String),
}

impl TidyError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        TidyError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Path the failure is about, when known
    pub fn path(&self) -> Option<&Path> {
        match self {
            TidyError::Io { path, .. } | TidyError::NotADirectory(path) => Some(path.as_path()),
            TidyError::Walk(err) => err.path(),
            _ => None,
        }
    }

    /// Convert into a reportable action about `fallback` when no better path is known
    pub fn to_action(&self, fallback: &Path) -> Action {
        let path = self.path().unwrap_or(fallback);
        Action::error(display_path(path), self.to_string())
    }
}

pub type TidyResult<T> = std::result::Result<T, TidyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ActionKind;

    #[test]
    fn test_io_error_action() {
        let err = TidyError::io(
            "/content/af/text.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let action = err.to_action(Path::new("/content"));
        assert_eq!(action.kind, ActionKind::Error);
        assert_eq!(action.path, "/content/af/text.json");
        assert_eq!(action.message.as_deref(), Some("permission denied"));
    }

    #[test]
    fn test_not_a_directory_message() {
        let err = TidyError::NotADirectory(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "Not a directory: /nope");
    }

    #[test]
    fn test_invalid_replacement_uses_fallback_path() {
        let err = TidyError::InvalidReplacement("lookup".to_string());
        let action = err.to_action(Path::new("/content"));
        assert_eq!(action.path, "/content");
    }
}
