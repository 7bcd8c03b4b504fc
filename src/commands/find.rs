use crate::error::GitletError;
use crate::hash::hash_to_hex;
use crate::repository::Repository;

use anyhow::Result;

pub fn run(repo: &Repository, message: &str) -> Result<()> {
    let mut matches = Vec::new();
    for id in repo.objects.all_commit_ids()? {
        let commit = repo.objects.get_commit(&id)?;
        if commit.message == message {
            matches.push(id);
        }
    }
    if matches.is_empty() {
        return Err(GitletError::NoCommitWithMessage.into());
    }
    matches.sort();
    for id in matches {
        println!("{}", hash_to_hex(&id));
    }
    Ok(())
}
