//! Remote mirror: `add-remote`/`rm-remote` manage local aliases;
//! `push`/`fetch`/`pull` copy commits and blobs between two `.gitlet`
//! directories over plain filesystem I/O — no network transport.

use crate::commands::merge;
use crate::error::GitletError;
use crate::object::Commit;
use crate::refs::RefStore;
use crate::remote::RemoteStore;
use crate::repository::Repository;
use crate::storage::ObjectStore;
use crate::transition;

use std::path::PathBuf;

use anyhow::Result;

fn remotes(repo: &Repository) -> RemoteStore {
    RemoteStore::new(&repo.gitlet_dir)
}

pub fn add(repo: &Repository, name: &str, path: &str) -> Result<()> {
    if remotes(repo).exists(name) {
        return Err(GitletError::RemoteAlreadyExists.into());
    }
    let path = PathBuf::from(path);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };
    remotes(repo).add(name, &absolute)
}

pub fn remove(repo: &Repository, name: &str) -> Result<()> {
    if !remotes(repo).exists(name) {
        return Err(GitletError::NoSuchRemote.into());
    }
    remotes(repo).remove(name)
}

fn remote_dir(repo: &Repository, name: &str) -> Result<PathBuf> {
    remotes(repo)
        .read(name)?
        .ok_or_else(|| GitletError::NoSuchRemote.into())
}

pub fn push(repo: &Repository, remote_name: &str, branch: &str) -> Result<()> {
    let remote_gitlet_dir = remote_dir(repo, remote_name)?;
    if !remote_gitlet_dir.is_dir() {
        return Err(GitletError::RemoteDirectoryNotFound.into());
    }
    let remote_objects = ObjectStore::new(&remote_gitlet_dir);
    let remote_refs = RefStore::new(&remote_gitlet_dir);

    let head_id = repo.head_commit_id()?;
    let remote_tip = remote_refs.read_branch(branch)?;

    if let Some(tip) = remote_tip {
        if !repo.ancestors(head_id)?.contains(&tip) {
            return Err(GitletError::PullBeforePush.into());
        }
    }

    for id in first_parent_chain_until(repo, head_id, remote_tip)? {
        let commit = repo.objects.get_commit(&id)?;
        for (_, blob_id) in &commit.file_map {
            if !remote_objects.has_blob(blob_id) {
                remote_objects.put_blob(&repo.objects.get_blob(blob_id)?)?;
            }
        }
        remote_objects.put_commit(&commit)?;
    }

    remote_refs.write_branch(branch, &head_id)?;

    let remote_root = remote_gitlet_dir
        .parent()
        .map(std::path::Path::to_path_buf)
        .unwrap_or(remote_gitlet_dir);
    let baseline = match remote_tip {
        Some(id) => remote_objects.get_commit(&id)?,
        None => Commit::initial(),
    };
    let target = repo.objects.get_commit(&head_id)?;
    transition::apply(&remote_root, &remote_objects, &baseline, &target)
}

pub fn fetch(repo: &Repository, remote_name: &str, branch: &str) -> Result<()> {
    let remote_gitlet_dir = remote_dir(repo, remote_name)?;
    if !remote_gitlet_dir.is_dir() {
        return Err(GitletError::RemoteDirectoryNotFound.into());
    }
    let remote_objects = ObjectStore::new(&remote_gitlet_dir);
    let remote_refs = RefStore::new(&remote_gitlet_dir);

    let tip = remote_refs
        .read_branch(branch)?
        .ok_or(GitletError::RemoteMissingBranch)?;

    let mut to_copy = Vec::new();
    let mut cur = Some(tip);
    while let Some(id) = cur {
        if repo.objects.has_commit(&id) {
            break;
        }
        to_copy.push(id);
        cur = remote_objects.get_commit(&id)?.parent;
    }
    to_copy.reverse();

    for id in to_copy {
        let commit = remote_objects.get_commit(&id)?;
        for (_, blob_id) in &commit.file_map {
            if !repo.objects.has_blob(blob_id) {
                repo.objects.put_blob(&remote_objects.get_blob(blob_id)?)?;
            }
        }
        repo.objects.put_commit(&commit)?;
    }

    repo.refs.write_branch(&format!("{remote_name}/{branch}"), &tip)
}

pub fn pull(repo: &Repository, remote_name: &str, branch: &str) -> Result<()> {
    fetch(repo, remote_name, branch)?;
    merge::run(repo, &format!("{remote_name}/{branch}"))
}

/// `start`'s first-parent chain, oldest first, stopping at (and excluding)
/// `stop` if given.
fn first_parent_chain_until(
    repo: &Repository,
    start: crate::hash::Hash,
    stop: Option<crate::hash::Hash>,
) -> Result<Vec<crate::hash::Hash>> {
    let mut chain = Vec::new();
    let mut cur = Some(start);
    while let Some(id) = cur {
        if Some(id) == stop {
            break;
        }
        chain.push(id);
        cur = repo.objects.get_commit(&id)?.parent;
    }
    chain.reverse();
    Ok(chain)
}
