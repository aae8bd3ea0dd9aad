//! Common utilities

use std::fs;
use std::path::Path;

/// Whether two regular files have byte-identical content
pub fn same_content(a: &Path, b: &Path) -> std::io::Result<bool> {
    let (meta_a, meta_b) = (fs::metadata(a)?, fs::metadata(b)?);
    if !meta_a.is_file() || !meta_b.is_file() || meta_a.len() != meta_b.len() {
        return Ok(false);
    }
    Ok(fs::read(a)? == fs::read(b)?)
}

/// Pluralize a count, e.g. `1 replacement`, `3 replacements`
pub fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_same_content() {
        let temp = tempdir().unwrap();
        let a = temp.path().join("a.txt");
        let b = temp.path().join("b.txt");
        let c = temp.path().join("c.txt");
        fs::write(&a, "hello").unwrap();
        fs::write(&b, "hello").unwrap();
        fs::write(&c, "world").unwrap();

        assert!(same_content(&a, &b).unwrap());
        assert!(!same_content(&a, &c).unwrap());
    }

    #[test]
    fn test_same_content_same_length_different_bytes() {
        let temp = tempdir().unwrap();
        let a = temp.path().join("a.bin");
        let b = temp.path().join("b.bin");
        fs::write(&a, [0u8, 1, 2, 3]).unwrap();
        fs::write(&b, [0u8, 1, 2, 4]).unwrap();

        assert!(!same_content(&a, &b).unwrap());
    }

    #[test]
    fn test_same_content_directory_is_false() {
        let temp = tempdir().unwrap();
        let a = temp.path().join("a.txt");
        fs::write(&a, "hello").unwrap();
        assert!(!same_content(&a, temp.path()).unwrap());
    }

    #[test]
    fn test_same_content_missing_is_error() {
        let temp = tempdir().unwrap();
        assert!(same_content(&temp.path().join("x"), &temp.path().join("y")).is_err());
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "replacement"), "1 replacement");
        assert_eq!(plural(0, "replacement"), "0 replacements");
        assert_eq!(plural(4, "tag"), "4 tags");
    }
}
