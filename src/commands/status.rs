use crate::object::Blob;
use crate::repository::Repository;
use crate::worktree;

use std::collections::BTreeMap;

use anyhow::Result;

pub fn run(repo: &Repository) -> Result<()> {
    let current = repo.current_branch()?;
    let branches = repo.refs.list_branches()?;
    let index = repo.load_index()?;
    let head = repo.head_commit()?;

    println!("=== Branches ===");
    for b in &branches {
        if *b == current {
            println!("*{b}");
        } else {
            println!("{b}");
        }
    }
    println!();

    println!("=== Staged Files ===");
    for name in index.add_map.keys() {
        println!("{name}");
    }
    println!();

    println!("=== Removed Files ===");
    for name in &index.rm_set {
        println!("{name}");
    }
    println!();

    println!("=== Modifications Not Staged For Commit ===");
    for (name, kind) in modifications(repo, &index, &head)? {
        println!("{name} ({kind})");
    }
    println!();

    println!("=== Untracked Files ===");
    for name in worktree::list_plain_files(&repo.root)? {
        let tracked = head.file_id(&name).is_some() || index.add_map.contains_key(&name);
        if !tracked {
            println!("{name}");
        }
    }
    println!();

    Ok(())
}

fn modifications(
    repo: &Repository,
    index: &crate::index::Index,
    head: &crate::object::Commit,
) -> Result<Vec<(String, &'static str)>> {
    let mut out: BTreeMap<String, &'static str> = BTreeMap::new();

    for (name, head_id) in &head.file_map {
        if index.rm_set.contains(name) || index.add_map.contains_key(name) {
            continue;
        }
        if !worktree::exists(&repo.root, name) {
            out.insert(name.clone(), "deleted");
        } else if Blob::new(worktree::read(&repo.root, name)?).id() != *head_id {
            out.insert(name.clone(), "modified");
        }
    }

    for (name, staged_id) in &index.add_map {
        if !worktree::exists(&repo.root, name) {
            out.insert(name.clone(), "deleted");
        } else if Blob::new(worktree::read(&repo.root, name)?).id() != *staged_id {
            out.insert(name.clone(), "modified");
        }
    }

    Ok(out.into_iter().collect())
}
