use crate::error::GitletError;
use crate::repository::Repository;
use crate::worktree;

use anyhow::Result;

pub fn run(repo: &Repository, filename: &str) -> Result<()> {
    let mut index = repo.load_index()?;
    let head = repo.head_commit()?;

    let staged = index.add_map.contains_key(filename);
    let tracked = head.file_id(filename).is_some();
    if !staged && !tracked {
        return Err(GitletError::NoReasonToRemove.into());
    }

    index.unstage_add(filename);
    if tracked {
        index.stage_remove(filename);
        if worktree::exists(&repo.root, filename) {
            worktree::remove(&repo.root, filename)?;
        }
    }

    repo.save_index(&index)
}
