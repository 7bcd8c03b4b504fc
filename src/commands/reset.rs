use crate::error::GitletError;
use crate::index::Index;
use crate::repository::Repository;
use crate::transition;

use anyhow::Result;

pub fn run(repo: &Repository, commit_spec: &str) -> Result<()> {
    let id = repo
        .objects
        .resolve_commit_prefix(commit_spec)?
        .ok_or(GitletError::NoSuchCommit)?;
    let target = repo.objects.get_commit(&id)?;
    let head = repo.head_commit()?;

    transition::apply(&repo.root, &repo.objects, &head, &target)?;

    let branch = repo.current_branch()?;
    repo.refs.write_branch(&branch, &id)?;
    repo.save_index(&Index::default())?;
    Ok(())
}
