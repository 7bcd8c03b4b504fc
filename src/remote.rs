//! Remote records: a local alias name mapped to the absolute path of
//! another repository's `.gitlet` directory. Purely local bookkeeping — no
//! network transport.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub struct RemoteStore {
    remotes_dir: PathBuf,
}

impl RemoteStore {
    #[must_use]
    pub fn new(gitlet_dir: &Path) -> Self {
        Self {
            remotes_dir: gitlet_dir.join("remotes"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.remotes_dir.join(name)
    }

    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    pub fn add(&self, name: &str, remote_gitlet_dir: &Path) -> Result<()> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, remote_gitlet_dir.to_string_lossy().as_bytes())
            .with_context(|| format!("write remote {name}"))
    }

    pub fn read(&self, name: &str) -> Result<Option<PathBuf>> {
        let path = self.path(name);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).with_context(|| format!("read remote {name}"))?;
        Ok(Some(PathBuf::from(content.trim())))
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        fs::remove_file(self.path(name)).with_context(|| format!("remove remote {name}"))
    }
}
