use crate::error::GitletError;
use crate::hash::Hash;
use crate::index::Index;
use crate::repository::Repository;
use crate::transition;
use crate::worktree;

use anyhow::Result;

/// `checkout -- F`: HEAD's version of `F`.
pub fn file_from_head(repo: &Repository, filename: &str) -> Result<()> {
    let head_id = repo.head_commit_id()?;
    file_from_commit(repo, head_id, filename)
}

/// `checkout <id> -- F`.
pub fn file_from_commit(repo: &Repository, commit_id: Hash, filename: &str) -> Result<()> {
    let commit = repo.objects.get_commit(&commit_id)?;
    let blob_id = commit
        .file_id(filename)
        .ok_or(GitletError::FileNotInCommit)?;
    let blob = repo.objects.get_blob(&blob_id)?;
    worktree::materialize(&repo.root, filename, &blob)
}

/// `checkout <branch>`: switch branches.
pub fn branch(repo: &Repository, name: &str) -> Result<()> {
    if !repo.refs.branch_exists(name) {
        return Err(GitletError::NoSuchBranchForCheckout.into());
    }
    let current = repo.current_branch()?;
    if current == name {
        return Err(GitletError::AlreadyOnBranch.into());
    }

    let target_id = repo.refs.read_branch(name)?.expect("branch_exists checked");
    let target = repo.objects.get_commit(&target_id)?;
    let head = repo.head_commit()?;

    transition::apply(&repo.root, &repo.objects, &head, &target)?;
    repo.refs.write_head(name)?;
    repo.save_index(&Index::default())?;
    Ok(())
}
