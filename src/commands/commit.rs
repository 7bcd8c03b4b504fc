use crate::clock;
use crate::error::GitletError;
use crate::hash::Hash;
use crate::index::Index;
use crate::object::Commit;
use crate::repository::Repository;

use std::collections::BTreeMap;

use anyhow::Result;

pub fn run(repo: &Repository, message: &str) -> Result<()> {
    if message.is_empty() {
        return Err(GitletError::EmptyCommitMessage.into());
    }
    let index = repo.load_index()?;
    if index.is_empty() {
        return Err(GitletError::NoChangesToCommit.into());
    }

    let head_id = repo.head_commit_id()?;
    create(repo, message, Some(head_id), None)?;
    repo.save_index(&Index::default())?;
    Ok(())
}

/// Build and store a commit inheriting `parent`'s `file_map` with the
/// current index's `add_map`/`rm_set` applied. Shared by the ordinary
/// `commit` command and `merge`'s unconditional merge commit — callers are
/// responsible for their own preconditions and for clearing the index.
pub fn create(
    repo: &Repository,
    message: &str,
    parent: Option<Hash>,
    parent2: Option<Hash>,
) -> Result<Hash> {
    let index = repo.load_index()?;
    let base: BTreeMap<String, Hash> = match parent {
        Some(id) => repo.objects.get_commit(&id)?.file_map.into_iter().collect(),
        None => BTreeMap::new(),
    };

    let mut file_map = base;
    for (name, id) in &index.add_map {
        file_map.insert(name.clone(), *id);
    }
    for name in &index.rm_set {
        file_map.remove(name);
    }

    let commit = Commit {
        message: message.to_string(),
        timestamp: clock::now(),
        parent,
        parent2,
        file_map: file_map.into_iter().collect(),
    };

    let id = repo.objects.put_commit(&commit)?;
    let branch = repo.current_branch()?;
    repo.refs.write_branch(&branch, &id)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Blob;
    use tempfile::TempDir;

    #[test]
    fn empty_message_is_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert_eq!(
            run(&repo, "").unwrap_err().downcast::<GitletError>().unwrap(),
            GitletError::EmptyCommitMessage
        );
    }

    #[test]
    fn no_changes_is_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert_eq!(
            run(&repo, "m")
                .unwrap_err()
                .downcast::<GitletError>()
                .unwrap(),
            GitletError::NoChangesToCommit
        );
    }

    #[test]
    fn commit_advances_branch_and_clears_index() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let mut index = repo.load_index().unwrap();
        let blob = Blob::new(b"hi".to_vec());
        let id = repo.objects.put_blob(&blob).unwrap();
        index.stage_add("a.txt", id);
        repo.save_index(&index).unwrap();

        run(&repo, "first").unwrap();

        let head = repo.head_commit().unwrap();
        assert_eq!(head.message, "first");
        assert_eq!(head.file_id("a.txt"), Some(id));
        assert!(repo.load_index().unwrap().is_empty());
    }
}
