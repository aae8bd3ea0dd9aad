//! Path utilities
//!
//! Display normalization and small name comparisons shared by the tasks.

use std::path::{Path, PathBuf};

/// Render a path for output
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Resolve the traversal root to an absolute path.
///
/// Falls back to joining onto the current directory when the root does not
/// exist, so the "not a directory" report still shows a meaningful path.
pub fn absolute_root(root: &Path) -> PathBuf {
    if let Ok(canonical) = root.canonicalize() {
        return canonical;
    }
    if root.is_absolute() {
        return root.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(root))
        .unwrap_or_else(|_| root.to_path_buf())
}

/// True when two names differ only by ASCII case (`jVideo` vs `jvideo`)
pub fn is_case_only_change(from: &str, to: &str) -> bool {
    from != to && from.eq_ignore_ascii_case(to)
}
