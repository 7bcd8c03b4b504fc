//! 40-hex SHA-1 digests used as object ids throughout the store.

use anyhow::{bail, Result};
use sha1::{Digest, Sha1};

pub type Hash = [u8; 20];

#[must_use]
pub fn hash_bytes(data: &[u8]) -> Hash {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

pub fn hex_to_hash(s: &str) -> Result<Hash> {
    if s.len() != 40 {
        bail!("invalid hash length: {}", s.len());
    }
    let bytes = hex::decode(s)?;
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("invalid hash length"))
}
