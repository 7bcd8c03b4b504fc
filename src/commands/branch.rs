use crate::error::GitletError;
use crate::repository::Repository;

use anyhow::Result;

pub fn create(repo: &Repository, name: &str) -> Result<()> {
    if repo.refs.branch_exists(name) {
        return Err(GitletError::BranchAlreadyExists.into());
    }
    let head_id = repo.head_commit_id()?;
    repo.refs.write_branch(name, &head_id)?;
    Ok(())
}

pub fn remove(repo: &Repository, name: &str) -> Result<()> {
    if !repo.refs.branch_exists(name) {
        return Err(GitletError::NoSuchBranch.into());
    }
    if repo.current_branch()? == name {
        return Err(GitletError::CannotRemoveCurrentBranch.into());
    }
    repo.refs.delete_branch(name)
}
