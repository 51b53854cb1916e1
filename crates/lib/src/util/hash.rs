//! Hashing utilities for deterministic, path-derived names.
//!
//! This module provides:
//! - `ContentHash`: A full 64-character SHA-256 hex digest
//! - `hash_bytes()`: Arbitrary byte hashing
//! - `path_digest()`: A short digest of a path, stable across runs

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::OBJ_DIGEST_LEN;

/// A full 64-character SHA-256 hash.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl std::fmt::Display for ContentHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Hash arbitrary bytes.
///
/// Returns the full 64-character SHA-256 hash.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(hex::encode(hasher.finalize()))
}

/// Short digest of a path's textual form.
///
/// Separators are normalized to `/` first so the digest is identical on every platform.
pub fn path_digest(path: &Path) -> String {
  let normalized = path.to_string_lossy().replace('\\', "/");
  let full = hash_bytes(normalized.as_bytes());
  full.0[..OBJ_DIGEST_LEN].to_string()
}
