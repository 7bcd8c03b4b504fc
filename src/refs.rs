//! Branch refs and HEAD. Each branch is a plain file under `refs/<name>`
//! holding a 40-hex commit id; namespaced names (`remote/branch`) live in a
//! nested directory matching the prefix. HEAD is a file holding the current
//! branch's name.

use crate::hash::{hash_to_hex, hex_to_hash, Hash};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

#[derive(Debug)]
pub struct RefStore {
    gitlet_dir: PathBuf,
}

impl RefStore {
    #[must_use]
    pub fn new(gitlet_dir: &Path) -> Self {
        Self {
            gitlet_dir: gitlet_dir.to_path_buf(),
        }
    }

    fn refs_dir(&self) -> PathBuf {
        self.gitlet_dir.join("refs")
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.refs_dir().join(name)
    }

    fn head_path(&self) -> PathBuf {
        self.gitlet_dir.join("HEAD")
    }

    pub fn read_head(&self) -> Result<String> {
        let content = fs::read_to_string(self.head_path()).context("read HEAD")?;
        Ok(content.trim().to_string())
    }

    /// Validates that `branch` exists before pointing HEAD at it.
    pub fn write_head(&self, branch: &str) -> Result<()> {
        if !self.branch_exists(branch) {
            bail!("cannot point HEAD at nonexistent branch '{branch}'");
        }
        fs::write(self.head_path(), branch).context("write HEAD")
    }

    #[must_use]
    pub fn branch_exists(&self, name: &str) -> bool {
        self.branch_path(name).is_file()
    }

    pub fn read_branch(&self, name: &str) -> Result<Option<Hash>> {
        let path = self.branch_path(name);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).with_context(|| format!("read ref {name}"))?;
        Ok(Some(hex_to_hash(content.trim())?))
    }

    pub fn write_branch(&self, name: &str, commit_id: &Hash) -> Result<()> {
        let path = self.branch_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, hash_to_hex(commit_id)).with_context(|| format!("write ref {name}"))
    }

    pub fn delete_branch(&self, name: &str) -> Result<()> {
        fs::remove_file(self.branch_path(name)).with_context(|| format!("delete ref {name}"))
    }

    /// All branch names, including namespaced remote-tracking refs in
    /// `remote/branch` form, sorted lexicographically.
    pub fn list_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        collect_branch_names(&self.refs_dir(), "", &mut names)?;
        names.sort();
        Ok(names)
    }
}

fn collect_branch_names(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().into_string().unwrap_or_default();
        let qualified = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_branch_names(&entry.path(), &qualified, out)?;
        } else if file_type.is_file() {
            out.push(qualified);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn refs() -> (TempDir, RefStore) {
        let dir = TempDir::new().unwrap();
        let gitlet = dir.path().join(".gitlet");
        fs::create_dir_all(gitlet.join("refs")).unwrap();
        (dir, RefStore::new(&gitlet))
    }

    #[test]
    fn write_and_read_branch() {
        let (_dir, refs) = refs();
        let id = [9u8; 20];
        refs.write_branch("master", &id).unwrap();
        assert_eq!(refs.read_branch("master").unwrap(), Some(id));
        assert_eq!(refs.read_branch("missing").unwrap(), None);
    }

    #[test]
    fn head_requires_existing_branch() {
        let (_dir, refs) = refs();
        assert!(refs.write_head("master").is_err());
        refs.write_branch("master", &[1u8; 20]).unwrap();
        refs.write_head("master").unwrap();
        assert_eq!(refs.read_head().unwrap(), "master");
    }

    #[test]
    fn namespaced_refs_list_with_nested_prefix() {
        let (_dir, refs) = refs();
        refs.write_branch("master", &[1u8; 20]).unwrap();
        refs.write_branch("origin/master", &[2u8; 20]).unwrap();
        let branches = refs.list_branches().unwrap();
        assert_eq!(branches, vec!["master".to_string(), "origin/master".to_string()]);
    }

    #[test]
    fn delete_branch_removes_file() {
        let (_dir, refs) = refs();
        refs.write_branch("dev", &[3u8; 20]).unwrap();
        refs.delete_branch("dev").unwrap();
        assert_eq!(refs.read_branch("dev").unwrap(), None);
    }
}
