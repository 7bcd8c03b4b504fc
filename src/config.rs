//! Ambient, environment-driven settings that sit outside the committed
//! repository state. Resolved once per process invocation; never written
//! back to disk.

use std::env;
use std::path::PathBuf;

pub struct Config {
    /// Root of the working directory the repository is rooted at.
    /// Defaults to the current directory; `GITLET_ROOT` overrides it so
    /// integration tests can drive a repository without `chdir`.
    pub root: PathBuf,
}

impl Config {
    pub fn resolve() -> anyhow::Result<Self> {
        let root = match env::var_os("GITLET_ROOT") {
            Some(path) => PathBuf::from(path),
            None => env::current_dir()?,
        };
        Ok(Self { root })
    }
}
