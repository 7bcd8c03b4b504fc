//! The repository handle: paths, the object store, and the ref store,
//! plus the small set of lookups almost every command needs (HEAD's
//! commit, resolving a branch-or-prefix operand, ancestor queries).

use crate::error::GitletError;
use crate::graph;
use crate::hash::Hash;
use crate::index::Index;
use crate::object::Commit;
use crate::refs::RefStore;
use crate::storage::ObjectStore;
use crate::worktree::{self, GITLET_DIR_NAME};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;

#[derive(Debug)]
pub struct Repository {
    pub root: PathBuf,
    pub gitlet_dir: PathBuf,
    pub objects: ObjectStore,
    pub refs: RefStore,
}

impl Repository {
    /// Open an already-initialized repository rooted at `root`.
    pub fn discover(root: &Path) -> Result<Self, GitletError> {
        let gitlet_dir = worktree::gitlet_dir(root);
        if !gitlet_dir.is_dir() {
            return Err(GitletError::NotInitialized);
        }
        Ok(Self::at(root))
    }

    fn at(root: &Path) -> Self {
        let gitlet_dir = worktree::gitlet_dir(root);
        Repository {
            objects: ObjectStore::new(&gitlet_dir),
            refs: RefStore::new(&gitlet_dir),
            root: root.to_path_buf(),
            gitlet_dir,
        }
    }

    /// Create a brand-new repository at `root`: object store directories,
    /// the initial commit, branch `master`, HEAD pointing at it, and an
    /// empty index.
    pub fn init(root: &Path) -> Result<Self, GitletError> {
        let gitlet_dir = worktree::gitlet_dir(root);
        if gitlet_dir.is_dir() {
            return Err(GitletError::AlreadyInitialized);
        }

        let repo = Self::at(root);
        (|| -> Result<()> {
            fs::create_dir_all(&repo.gitlet_dir)?;
            repo.objects.create_dirs()?;
            fs::create_dir_all(repo.gitlet_dir.join("refs"))?;
            fs::create_dir_all(repo.gitlet_dir.join("remotes"))?;

            let initial = Commit::initial();
            let id = repo.objects.put_commit(&initial)?;
            repo.refs.write_branch("master", &id)?;
            fs::write(repo.gitlet_dir.join("HEAD"), "master")?;
            Index::default().save(&repo.gitlet_dir)?;
            debug!("initialized repository at {}", root.display());
            Ok(())
        })()
        .map_err(|_| GitletError::AlreadyInitialized)?;

        Ok(repo)
    }

    pub fn current_branch(&self) -> Result<String> {
        self.refs.read_head()
    }

    pub fn head_commit_id(&self) -> Result<Hash> {
        let branch = self.current_branch()?;
        self.refs
            .read_branch(&branch)?
            .ok_or_else(|| anyhow::anyhow!("HEAD branch '{branch}' has no commit"))
    }

    pub fn head_commit(&self) -> Result<Commit> {
        self.objects.get_commit(&self.head_commit_id()?)
    }

    pub fn load_index(&self) -> Result<Index> {
        Index::load(&self.gitlet_dir)
    }

    pub fn save_index(&self, index: &Index) -> Result<()> {
        index.save(&self.gitlet_dir)
    }

    /// Resolve a branch name or (possibly abbreviated) commit id to a full
    /// commit id.
    pub fn resolve_commit(&self, spec: &str) -> Result<Option<Hash>> {
        if let Some(id) = self.refs.read_branch(spec)? {
            return Ok(Some(id));
        }
        self.objects.resolve_commit_prefix(spec)
    }

    pub fn ancestors(&self, start: Hash) -> Result<HashSet<Hash>> {
        graph::ancestors(&self.objects, start)
    }

    pub fn split_point(&self, head: Hash, other: Hash) -> Result<Hash> {
        graph::split_point(&self.objects, head, other)
    }

    /// `(name, path)` pairs: wrapper to avoid every command re-deriving the
    /// `.gitlet`-relative repository layout.
    #[must_use]
    pub fn dir_name() -> &'static str {
        GITLET_DIR_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_twice_fails() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();
        assert_eq!(
            Repository::init(dir.path()).unwrap_err(),
            GitletError::AlreadyInitialized
        );
    }

    #[test]
    fn discover_requires_init() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            Repository::discover(dir.path()).unwrap_err(),
            GitletError::NotInitialized
        );
    }

    #[test]
    fn init_sets_up_master_and_head() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert_eq!(repo.current_branch().unwrap(), "master");
        let head = repo.head_commit().unwrap();
        assert_eq!(head.message, "initial commit");
        assert!(head.file_map.is_empty());
    }
}
