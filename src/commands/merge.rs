//! Three-way merge. Split-point discovery lives in [`crate::graph`]; this
//! module classifies each file against (split, HEAD, other) and resolves
//! or flags a conflict, per file, before promoting the result to a merge
//! commit.

use crate::commands::commit;
use crate::error::GitletError;
use crate::hash::Hash;
use crate::index::Index;
use crate::object::Blob;
use crate::repository::Repository;
use crate::transition;
use crate::worktree;

use std::collections::BTreeSet;

use anyhow::Result;
use log::debug;

pub fn run(repo: &Repository, branch: &str) -> Result<()> {
    let index = repo.load_index()?;
    if !index.is_empty() {
        return Err(GitletError::UncommittedChanges.into());
    }
    let current = repo.current_branch()?;
    if branch == current {
        return Err(GitletError::MergeWithSelf.into());
    }
    if !repo.refs.branch_exists(branch) {
        return Err(GitletError::NoSuchBranch.into());
    }

    let head_id = repo.head_commit_id()?;
    let other_id = repo.refs.read_branch(branch)?.expect("branch_exists checked");
    let split_id = repo.split_point(head_id, other_id)?;

    if split_id == other_id {
        println!("Given branch is an ancestor of the current branch.");
        return Ok(());
    }

    let head = repo.objects.get_commit(&head_id)?;
    let other = repo.objects.get_commit(&other_id)?;

    if split_id == head_id {
        transition::apply(&repo.root, &repo.objects, &head, &other)?;
        repo.refs.write_branch(&current, &other_id)?;
        repo.save_index(&Index::default())?;
        println!("Current branch fast-forwarded.");
        return Ok(());
    }

    let split = repo.objects.get_commit(&split_id)?;

    let mut names: BTreeSet<String> = BTreeSet::new();
    names.extend(split.file_map.iter().map(|(n, _)| n.clone()));
    names.extend(head.file_map.iter().map(|(n, _)| n.clone()));
    names.extend(other.file_map.iter().map(|(n, _)| n.clone()));

    let classified: Vec<(String, Classification)> = names
        .into_iter()
        .map(|name| {
            let s = split.file_id(&name);
            let h = head.file_id(&name);
            let o = other.file_id(&name);
            (name, classify(s, h, o))
        })
        .collect();

    for (name, class) in &classified {
        let writes = matches!(class, Classification::TakeOther(_) | Classification::Conflict);
        if writes && head.file_id(name).is_none() && worktree::exists(&repo.root, name) {
            return Err(GitletError::UntrackedFileInTheWay.into());
        }
    }

    let mut new_index = Index::default();
    let mut conflicted = false;

    for (name, class) in &classified {
        debug!("merge: {name} classified as {class:?}");
        match class {
            Classification::TakeOther(id) => {
                let blob = repo.objects.get_blob(id)?;
                worktree::materialize(&repo.root, name, &blob)?;
                new_index.stage_add(name, *id);
            }
            Classification::Remove => {
                worktree::remove(&repo.root, name)?;
                new_index.stage_remove(name);
            }
            Classification::Conflict => {
                conflicted = true;
                let head_content = head
                    .file_id(name)
                    .map(|id| repo.objects.get_blob(&id))
                    .transpose()?
                    .map_or(Vec::new(), |b| b.content);
                let other_content = other
                    .file_id(name)
                    .map(|id| repo.objects.get_blob(&id))
                    .transpose()?
                    .map_or(Vec::new(), |b| b.content);

                let mut merged = Vec::new();
                merged.extend_from_slice(b"<<<<<<< HEAD\n");
                merged.extend_from_slice(&ensure_trailing_newline(head_content));
                merged.extend_from_slice(b"=======\n");
                merged.extend_from_slice(&ensure_trailing_newline(other_content));
                merged.extend_from_slice(b">>>>>>>\n");

                let blob = Blob::new(merged);
                let id = repo.objects.put_blob(&blob)?;
                worktree::materialize(&repo.root, name, &blob)?;
                new_index.stage_add(name, id);
            }
            Classification::Unchanged => {}
        }
    }

    repo.save_index(&new_index)?;
    let message = format!("Merged {branch} into {current}.");
    commit::create(repo, &message, Some(head_id), Some(other_id))?;
    repo.save_index(&Index::default())?;

    if conflicted {
        println!("Encountered a merge conflict.");
    }
    Ok(())
}

#[derive(Debug)]
enum Classification {
    TakeOther(Hash),
    Remove,
    Conflict,
    Unchanged,
}

fn classify(s: Option<Hash>, h: Option<Hash>, o: Option<Hash>) -> Classification {
    match (s, h, o) {
        (Some(s), Some(h), Some(o)) if h == s && o != s => Classification::TakeOther(o),
        (None, None, Some(o)) => Classification::TakeOther(o),
        (Some(s), Some(h), None) if h == s => Classification::Remove,
        (Some(s), Some(h), Some(o)) if h != o && h != s && o != s => Classification::Conflict,
        (Some(s), Some(h), None) if h != s => Classification::Conflict,
        (Some(s), None, Some(o)) if o != s => Classification::Conflict,
        (None, Some(h), Some(o)) if h != o => Classification::Conflict,
        _ => Classification::Unchanged,
    }
}

fn ensure_trailing_newline(mut content: Vec<u8>) -> Vec<u8> {
    if !content.is_empty() && !content.ends_with(b"\n") {
        content.push(b'\n');
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_matches_the_merge_table() {
        let s = Some([1u8; 20]);
        let h_same = s;
        let o_changed = Some([2u8; 20]);

        assert!(matches!(
            classify(s, h_same, o_changed),
            Classification::TakeOther(_)
        ));
        assert!(matches!(classify(None, None, o_changed), Classification::TakeOther(_)));
        assert!(matches!(classify(s, h_same, None), Classification::Remove));
        assert!(matches!(
            classify(s, Some([3u8; 20]), o_changed),
            Classification::Conflict
        ));
        assert!(matches!(classify(s, Some([3u8; 20]), None), Classification::Conflict));
        assert!(matches!(classify(None, Some([1u8; 20]), Some([2u8; 20])), Classification::Conflict));
        assert!(matches!(classify(s, h_same, s), Classification::Unchanged));
    }

    #[test]
    fn conflict_marker_adds_missing_newline() {
        assert_eq!(ensure_trailing_newline(b"D".to_vec()), b"D\n".to_vec());
        assert_eq!(ensure_trailing_newline(b"D\n".to_vec()), b"D\n".to_vec());
        assert_eq!(ensure_trailing_newline(Vec::new()), Vec::new());
    }
}
