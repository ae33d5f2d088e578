//! crates/pm_io/src/hasher.rs
//!
//! Deterministic hashing and id builders.
//! - Canonical JSON hashing: sorted object keys, array order preserved.
//! - Hex digests are lowercase.
//! - `RES:` ids derive from the canonical bytes of an election outcome body.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_json_bytes;
use crate::IoError;

/// SHA-256 over raw bytes, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// SHA-256 over the canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize + ?Sized>(value: &T) -> Result<String, IoError> {
    let v = serde_json::to_value(value)?;
    Ok(sha256_hex(&to_canonical_json_bytes(&v)))
}

/// `RES:<hex>` for an election outcome body.
pub fn result_id_from_canonical<T: Serialize + ?Sized>(value: &T) -> Result<String, IoError> {
    let hex = sha256_canonical(value)?;
    Ok(format!("RES:{hex}"))
}

/// True for a well-formed `RES:` id (64 lowercase hex digits).
pub fn is_result_id(s: &str) -> bool {
    s.strip_prefix("RES:")
        .map(|h| h.len() == 64 && h.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')))
        .unwrap_or(false)
}
