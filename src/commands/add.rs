use crate::error::GitletError;
use crate::object::Blob;
use crate::repository::Repository;
use crate::worktree;

use anyhow::Result;

pub fn run(repo: &Repository, filename: &str) -> Result<()> {
    if !worktree::exists(&repo.root, filename) {
        return Err(GitletError::FileDoesNotExist.into());
    }

    let content = worktree::read(&repo.root, filename)?;
    let blob = Blob::new(content);
    let id = blob.id();

    let head = repo.head_commit()?;
    let mut index = repo.load_index()?;

    if head.file_id(filename) == Some(id) {
        index.unstage_add(filename);
    } else {
        repo.objects.put_blob(&blob)?;
        index.stage_add(filename, id);
    }
    index.rm_set.remove(filename);

    repo.save_index(&index)
}
