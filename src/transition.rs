//! Shared working-tree transition: overwrite/delete a working tree to match
//! a target commit, given a baseline commit the tree is assumed to match.
//! Used by `checkout <branch>`, `reset`, the fast-forward path of `merge`,
//! and `push`'s remote materialization.

use crate::error::GitletError;
use crate::object::Commit;
use crate::storage::ObjectStore;
use crate::worktree;

use std::path::Path;

use anyhow::Result;

/// Write every file `target` adds or changes relative to `baseline`, and
/// delete every file `baseline` tracked that `target` doesn't. Refuses,
/// before touching anything, if a file `target` would write already sits in
/// `root` untracked by `baseline`.
pub fn apply(root: &Path, objects: &ObjectStore, baseline: &Commit, target: &Commit) -> Result<()> {
    for (name, _) in &target.file_map {
        if baseline.file_id(name).is_none() && worktree::exists(root, name) {
            return Err(GitletError::UntrackedFileInTheWay.into());
        }
    }

    for (name, id) in &target.file_map {
        let blob = objects.get_blob(id)?;
        worktree::materialize(root, name, &blob)?;
    }

    for (name, _) in &baseline.file_map {
        if target.file_id(name).is_none() {
            worktree::remove(root, name)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Blob;
    use tempfile::TempDir;

    fn store(dir: &Path) -> ObjectStore {
        let store = ObjectStore::new(&dir.join(".gitlet"));
        store.create_dirs().unwrap();
        store
    }

    fn commit_with(store: &ObjectStore, files: &[(&str, &[u8])]) -> Commit {
        let mut file_map = Vec::new();
        for (name, content) in files {
            let blob = Blob::new(content.to_vec());
            let id = store.put_blob(&blob).unwrap();
            file_map.push((name.to_string(), id));
        }
        Commit {
            message: "m".to_string(),
            timestamp: 0,
            parent: None,
            parent2: None,
            file_map,
        }
    }

    #[test]
    fn refuses_to_clobber_untracked_file() {
        let dir = TempDir::new().unwrap();
        let store = store(dir.path());
        let baseline = commit_with(&store, &[]);
        let target = commit_with(&store, &[("a.txt", b"new")]);
        std::fs::write(dir.path().join("a.txt"), b"stray").unwrap();

        let err = apply(dir.path(), &store, &baseline, &target).unwrap_err();
        assert_eq!(
            err.downcast::<GitletError>().unwrap(),
            GitletError::UntrackedFileInTheWay
        );
    }

    #[test]
    fn writes_new_and_removes_gone_files() {
        let dir = TempDir::new().unwrap();
        let store = store(dir.path());
        let baseline = commit_with(&store, &[("a.txt", b"a"), ("b.txt", b"b")]);
        let target = commit_with(&store, &[("a.txt", b"a2")]);

        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();
        std::fs::write(dir.path().join("b.txt"), b"b").unwrap();

        apply(dir.path(), &store, &baseline, &target).unwrap();

        assert_eq!(std::fs::read(dir.path().join("a.txt")).unwrap(), b"a2");
        assert!(!dir.path().join("b.txt").exists());
    }
}
