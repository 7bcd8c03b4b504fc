//! The staging index: pending additions (`add_map`) and removals (`rm_set`)
//! for the next commit. The two are kept disjoint — staging a name for one
//! side always clears it from the other.

use crate::hash::Hash;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

const MAGIC: &[u8; 4] = b"GIDX";
const VERSION: u32 = 1;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Index {
    pub add_map: BTreeMap<String, Hash>,
    pub rm_set: BTreeSet<String>,
}

impl Index {
    fn path(gitlet_dir: &Path) -> PathBuf {
        gitlet_dir.join("index")
    }

    pub fn load(gitlet_dir: &Path) -> Result<Self> {
        let path = Self::path(gitlet_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read(&path).context("read index")?;
        Self::decode(&data)
    }

    pub fn save(&self, gitlet_dir: &Path) -> Result<()> {
        fs::write(Self::path(gitlet_dir), self.encode()).context("write index")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add_map.is_empty() && self.rm_set.is_empty()
    }

    pub fn clear(&mut self) {
        self.add_map.clear();
        self.rm_set.clear();
    }

    pub fn stage_add(&mut self, name: &str, blob_id: Hash) {
        self.rm_set.remove(name);
        self.add_map.insert(name.to_string(), blob_id);
    }

    pub fn unstage_add(&mut self, name: &str) {
        self.add_map.remove(name);
    }

    pub fn stage_remove(&mut self, name: &str) {
        self.add_map.remove(name);
        self.rm_set.insert(name.to_string());
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&VERSION.to_le_bytes());

        buf.extend_from_slice(&(self.add_map.len() as u32).to_le_bytes());
        for (name, id) in &self.add_map {
            buf.extend_from_slice(&(name.len() as u32).to_le_bytes());
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(id);
        }

        buf.extend_from_slice(&(self.rm_set.len() as u32).to_le_bytes());
        for name in &self.rm_set {
            buf.extend_from_slice(&(name.len() as u32).to_le_bytes());
            buf.extend_from_slice(name.as_bytes());
        }

        buf
    }

    fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < 12 || &data[0..4] != MAGIC {
            bail!("invalid index file");
        }
        let version = u32::from_le_bytes(data[4..8].try_into()?);
        if version != VERSION {
            bail!("unsupported index version {version}");
        }

        let mut cur = 8usize;
        let add_count = read_u32(data, &mut cur)? as usize;
        let mut add_map = BTreeMap::new();
        for _ in 0..add_count {
            let name = read_string(data, &mut cur)?;
            let mut id = [0u8; 20];
            id.copy_from_slice(&data[cur..cur + 20]);
            cur += 20;
            add_map.insert(name, id);
        }

        let rm_count = read_u32(data, &mut cur)? as usize;
        let mut rm_set = BTreeSet::new();
        for _ in 0..rm_count {
            rm_set.insert(read_string(data, &mut cur)?);
        }

        Ok(Index { add_map, rm_set })
    }
}

fn read_u32(data: &[u8], cur: &mut usize) -> Result<u32> {
    let v = u32::from_le_bytes(data[*cur..*cur + 4].try_into()?);
    *cur += 4;
    Ok(v)
}

fn read_string(data: &[u8], cur: &mut usize) -> Result<String> {
    let len = read_u32(data, cur)? as usize;
    let s = String::from_utf8(data[*cur..*cur + len].to_vec())?;
    *cur += len;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn add_and_remove_are_disjoint() {
        let mut index = Index::default();
        index.stage_add("a.txt", [1u8; 20]);
        index.stage_remove("a.txt");
        assert!(!index.add_map.contains_key("a.txt"));
        assert!(index.rm_set.contains("a.txt"));

        index.stage_add("a.txt", [2u8; 20]);
        assert!(!index.rm_set.contains("a.txt"));
        assert_eq!(index.add_map["a.txt"], [2u8; 20]);
    }

    #[test]
    fn persists_round_trip() {
        let dir = TempDir::new().unwrap();
        let gitlet = dir.path().join(".gitlet");
        fs::create_dir_all(&gitlet).unwrap();

        let mut index = Index::default();
        index.stage_add("a.txt", [1u8; 20]);
        index.stage_remove("b.txt");
        index.save(&gitlet).unwrap();

        let loaded = Index::load(&gitlet).unwrap();
        assert_eq!(loaded, index);
    }

    #[test]
    fn missing_index_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = Index::load(&dir.path().join(".gitlet")).unwrap();
        assert!(loaded.is_empty());
    }
}
