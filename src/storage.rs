//! Content-addressed object store: one file per object under
//! `objects/blobs/<id>` and `objects/commits/<id>`, named by the full
//! 40-hex digest. No packing, no compression — the literal layout is part
//! of the external contract, not an implementation detail.

use crate::hash::{hash_to_hex, hex_to_hash, Hash};
use crate::object::{decode_blob, decode_commit, encode_blob, encode_commit, Blob, Commit};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::trace;

#[derive(Debug)]
pub struct ObjectStore {
    blobs_dir: PathBuf,
    commits_dir: PathBuf,
}

impl ObjectStore {
    #[must_use]
    pub fn new(gitlet_dir: &Path) -> Self {
        Self {
            blobs_dir: gitlet_dir.join("objects").join("blobs"),
            commits_dir: gitlet_dir.join("objects").join("commits"),
        }
    }

    pub fn create_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.blobs_dir)?;
        fs::create_dir_all(&self.commits_dir)?;
        Ok(())
    }

    /// Write is idempotent: an existing id is never rewritten.
    pub fn put_blob(&self, blob: &Blob) -> Result<Hash> {
        let id = blob.id();
        let path = self.blobs_dir.join(hash_to_hex(&id));
        if path.exists() {
            trace!("put_blob {}: already present, skipping write", hash_to_hex(&id));
        } else {
            fs::write(&path, encode_blob(blob))
                .with_context(|| format!("write blob {}", path.display()))?;
        }
        Ok(id)
    }

    pub fn put_commit(&self, commit: &Commit) -> Result<Hash> {
        let id = commit.id();
        let path = self.commits_dir.join(hash_to_hex(&id));
        if path.exists() {
            trace!("put_commit {}: already present, skipping write", hash_to_hex(&id));
        } else {
            fs::write(&path, encode_commit(commit))
                .with_context(|| format!("write commit {}", path.display()))?;
        }
        Ok(id)
    }

    pub fn get_blob(&self, id: &Hash) -> Result<Blob> {
        let path = self.blobs_dir.join(hash_to_hex(id));
        let data = fs::read(&path).with_context(|| format!("read blob {}", path.display()))?;
        decode_blob(&data)
    }

    pub fn get_commit(&self, id: &Hash) -> Result<Commit> {
        let path = self.commits_dir.join(hash_to_hex(id));
        let data = fs::read(&path).with_context(|| format!("read commit {}", path.display()))?;
        decode_commit(&data)
    }

    #[must_use]
    pub fn has_blob(&self, id: &Hash) -> bool {
        self.blobs_dir.join(hash_to_hex(id)).exists()
    }

    #[must_use]
    pub fn has_commit(&self, id: &Hash) -> bool {
        self.commits_dir.join(hash_to_hex(id)).exists()
    }

    /// Resolve a possibly-abbreviated commit id. A 40-char prefix is an
    /// exact match; anything shorter scans the commits directory (in
    /// sorted filename order) for the first id that starts with it.
    pub fn resolve_commit_prefix(&self, prefix: &str) -> Result<Option<Hash>> {
        if prefix.len() == 40 {
            return Ok(hex_to_hash(prefix).ok().filter(|id| self.has_commit(id)));
        }
        if prefix.len() > 40 || prefix.is_empty() {
            return Ok(None);
        }

        let mut names: Vec<String> = fs::read_dir(&self.commits_dir)?
            .filter_map(Result::ok)
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        names.sort();

        for name in names {
            if name.starts_with(prefix) {
                return Ok(hex_to_hash(&name).ok());
            }
        }
        Ok(None)
    }

    /// All commit ids currently in the store, for `global-log` / `find`.
    pub fn all_commit_ids(&self) -> Result<Vec<Hash>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.commits_dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if let Ok(id) = hex_to_hash(name) {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ObjectStore) {
        let dir = TempDir::new().unwrap();
        let store = ObjectStore::new(&dir.path().join(".gitlet"));
        store.create_dirs().unwrap();
        (dir, store)
    }

    #[test]
    fn blob_roundtrip_and_idempotent_put() {
        let (_dir, store) = store();
        let blob = Blob::new(b"content".to_vec());
        let id1 = store.put_blob(&blob).unwrap();
        let id2 = store.put_blob(&blob).unwrap();
        assert_eq!(id1, id2);
        assert!(store.has_blob(&id1));
        assert_eq!(store.get_blob(&id1).unwrap(), blob);
    }

    #[test]
    fn commit_prefix_resolution() {
        let (_dir, store) = store();
        let commit = Commit::initial();
        let id = store.put_commit(&commit).unwrap();
        let hex = hash_to_hex(&id);
        assert_eq!(store.resolve_commit_prefix(&hex[..6]).unwrap(), Some(id));
        assert_eq!(store.resolve_commit_prefix("ffffffffff").unwrap(), None);
    }

    #[test]
    fn all_commit_ids_lists_every_stored_commit() {
        let (_dir, store) = store();
        let a = store.put_commit(&Commit::initial()).unwrap();
        let mut b = Commit::initial();
        b.message = "second".to_string();
        let b_id = store.put_commit(&b).unwrap();
        let ids = store.all_commit_ids().unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&a));
        assert!(ids.contains(&b_id));
    }
}
