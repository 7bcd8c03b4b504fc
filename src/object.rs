//! Blob and Commit objects: the only two object kinds the store ever holds.
//!
//! Encoding is hand-rolled rather than derived, because the encoded bytes
//! *are* the object's identity (`sha1(encode(obj)) == id`) — any change to
//! the byte layout is a format break, so the layout is written out in full
//! here instead of behind a generic serializer.

use crate::hash::{hash_bytes, Hash};

use anyhow::{bail, Result};

const MAGIC: &[u8; 4] = b"GIT1";
const TAG_BLOB: u8 = 1;
const TAG_COMMIT: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub content: Vec<u8>,
}

impl Blob {
    #[must_use]
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    #[must_use]
    pub fn id(&self) -> Hash {
        hash_bytes(&encode_blob(self))
    }

    fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < 8 {
            bail!("truncated blob");
        }
        let len = u64::from_le_bytes(data[0..8].try_into()?) as usize;
        if data.len() < 8 + len {
            bail!("truncated blob");
        }
        Ok(Blob {
            content: data[8..8 + len].to_vec(),
        })
    }
}

/// Commit's `file_map` is kept sorted by name so two commits with the same
/// logical content always encode to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub message: String,
    pub timestamp: i64,
    pub parent: Option<Hash>,
    pub parent2: Option<Hash>,
    pub file_map: Vec<(String, Hash)>,
}

impl Commit {
    pub fn initial() -> Self {
        Commit {
            message: "initial commit".to_string(),
            timestamp: 0,
            parent: None,
            parent2: None,
            file_map: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parent2.is_some()
    }

    pub fn file_id(&self, name: &str) -> Option<Hash> {
        self.file_map
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }

    #[must_use]
    pub fn id(&self) -> Hash {
        hash_bytes(&encode_commit(self))
    }

    fn decode(data: &[u8]) -> Result<Self> {
        let mut cur = 0usize;

        let msg_len = read_u32(data, &mut cur)? as usize;
        let message = String::from_utf8(data[cur..cur + msg_len].to_vec())?;
        cur += msg_len;

        let timestamp = read_i64(data, &mut cur)?;

        let parent = read_optional_hash(data, &mut cur)?;
        let parent2 = read_optional_hash(data, &mut cur)?;

        let count = read_u32(data, &mut cur)? as usize;
        let mut file_map = Vec::with_capacity(count);
        for _ in 0..count {
            let name_len = read_u32(data, &mut cur)? as usize;
            let name = String::from_utf8(data[cur..cur + name_len].to_vec())?;
            cur += name_len;
            let mut id = [0u8; 20];
            id.copy_from_slice(&data[cur..cur + 20]);
            cur += 20;
            file_map.push((name, id));
        }

        Ok(Commit {
            message,
            timestamp,
            parent,
            parent2,
            file_map,
        })
    }
}

fn write_optional_hash(buf: &mut Vec<u8>, hash: Option<Hash>) {
    match hash {
        Some(h) => {
            buf.push(1);
            buf.extend_from_slice(&h);
        }
        None => buf.push(0),
    }
}

fn read_optional_hash(data: &[u8], cur: &mut usize) -> Result<Option<Hash>> {
    let present = data[*cur];
    *cur += 1;
    if present == 0 {
        return Ok(None);
    }
    let mut h = [0u8; 20];
    h.copy_from_slice(&data[*cur..*cur + 20]);
    *cur += 20;
    Ok(Some(h))
}

fn read_u32(data: &[u8], cur: &mut usize) -> Result<u32> {
    let v = u32::from_le_bytes(data[*cur..*cur + 4].try_into()?);
    *cur += 4;
    Ok(v)
}

fn read_i64(data: &[u8], cur: &mut usize) -> Result<i64> {
    let v = i64::from_le_bytes(data[*cur..*cur + 8].try_into()?);
    *cur += 8;
    Ok(v)
}

/// Encode a [`Blob`] to the bytes whose SHA-1 digest is its id.
pub fn encode_blob(blob: &Blob) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAGIC.len() + 1 + 8 + blob.content.len());
    buf.extend_from_slice(MAGIC);
    buf.push(TAG_BLOB);
    buf.extend_from_slice(&(blob.content.len() as u64).to_le_bytes());
    buf.extend_from_slice(&blob.content);
    buf
}

/// Encode a [`Commit`] to the bytes whose SHA-1 digest is its id. `file_map`
/// is sorted by name first so the encoding only depends on logical content.
pub fn encode_commit(commit: &Commit) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(MAGIC);
    buf.push(TAG_COMMIT);

    buf.extend_from_slice(&(commit.message.len() as u32).to_le_bytes());
    buf.extend_from_slice(commit.message.as_bytes());

    buf.extend_from_slice(&commit.timestamp.to_le_bytes());

    write_optional_hash(&mut buf, commit.parent);
    write_optional_hash(&mut buf, commit.parent2);

    let mut sorted = commit.file_map.clone();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    buf.extend_from_slice(&(sorted.len() as u32).to_le_bytes());
    for (name, id) in &sorted {
        buf.extend_from_slice(&(name.len() as u32).to_le_bytes());
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(id);
    }

    buf
}

pub fn decode_blob(data: &[u8]) -> Result<Blob> {
    expect_tag(data, TAG_BLOB)?;
    Blob::decode(&data[5..])
}

pub fn decode_commit(data: &[u8]) -> Result<Commit> {
    expect_tag(data, TAG_COMMIT)?;
    Commit::decode(&data[5..])
}

fn expect_tag(data: &[u8], tag: u8) -> Result<()> {
    if data.len() < 5 {
        bail!("object data too short");
    }
    if &data[0..4] != MAGIC {
        bail!("invalid object magic");
    }
    if data[4] != tag {
        bail!("object tag mismatch");
    }
    Ok(())
}
