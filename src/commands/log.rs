use crate::clock;
use crate::hash::{hash_to_hex, Hash};
use crate::object::Commit;
use crate::repository::Repository;

use anyhow::Result;

/// Walks HEAD's first-parent chain, most recent first.
pub fn run(repo: &Repository) -> Result<()> {
    let mut cur = Some(repo.head_commit_id()?);
    while let Some(id) = cur {
        let commit = repo.objects.get_commit(&id)?;
        print_commit(&id, &commit);
        cur = commit.parent;
    }
    Ok(())
}

pub(crate) fn print_commit(id: &Hash, commit: &Commit) {
    println!("===");
    println!("commit {}", hash_to_hex(id));
    if commit.is_merge() {
        let p1 = hash_to_hex(&commit.parent.expect("merge commit has a first parent"));
        let p2 = hash_to_hex(&commit.parent2.expect("is_merge implies parent2"));
        println!("Merge: {} {}", &p1[..7], &p2[..7]);
    }
    println!("Date: {}", clock::format(commit.timestamp));
    println!("{}", commit.message);
    println!();
}
