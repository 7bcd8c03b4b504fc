//! Working-tree operations. Per the Non-goals, only plain files directly
//! under the repository root are ever touched — no recursion into
//! subdirectories, no following symlinks.

use crate::object::Blob;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;

/// Write `blob`'s content to `root/name`, creating or overwriting the file.
pub fn materialize(root: &Path, name: &str, blob: &Blob) -> Result<()> {
    let path = root.join(name);
    fs::write(&path, &blob.content).with_context(|| format!("write {}", path.display()))
}

/// Remove `root/name` if it exists; a no-op otherwise.
pub fn remove(root: &Path, name: &str) -> Result<()> {
    let path = root.join(name);
    if path.exists() {
        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
    }
    Ok(())
}

#[must_use]
pub fn exists(root: &Path, name: &str) -> bool {
    root.join(name).is_file()
}

pub fn read(root: &Path, name: &str) -> Result<Vec<u8>> {
    let path = root.join(name);
    fs::read(&path).with_context(|| format!("read {}", path.display()))
}

/// Names of plain files directly under `root`, excluding `.gitlet` itself.
/// Sorted for deterministic output.
pub fn list_plain_files(root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => warn!("skipping non-UTF-8 working-tree entry {:?}", entry.file_name()),
            }
        }
    }
    names.sort();
    Ok(names)
}

pub const GITLET_DIR_NAME: &str = ".gitlet";

#[must_use]
pub fn gitlet_dir(root: &Path) -> PathBuf {
    root.join(GITLET_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn materialize_then_remove() {
        let dir = TempDir::new().unwrap();
        let blob = Blob::new(b"hi".to_vec());
        materialize(dir.path(), "a.txt", &blob).unwrap();
        assert!(exists(dir.path(), "a.txt"));
        assert_eq!(read(dir.path(), "a.txt").unwrap(), b"hi");
        remove(dir.path(), "a.txt").unwrap();
        assert!(!exists(dir.path(), "a.txt"));
    }

    #[test]
    fn remove_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        remove(dir.path(), "missing.txt").unwrap();
    }

    #[test]
    fn list_plain_files_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join("b.txt"), b"b").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let names = list_plain_files(dir.path()).unwrap();
        assert_eq!(names, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }
}
