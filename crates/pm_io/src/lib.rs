//! crates/pm_io/src/lib.rs
//! Offline I/O for the legislature simulator.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Config files are local JSON only; any `<scheme>://` path is rejected.
//! - Output artifacts are written atomically; hashes are over canonical JSON.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for pm_io (loader/canonical_json/hasher).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse/serialize errors with a JSON Pointer hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Config content that parsed but breaks a domain rule.
    #[error("invalid config at {pointer}: {msg}")]
    Invalid { pointer: String, msg: String },
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; callers may enrich.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;

pub mod prelude {
    pub use crate::{looks_like_url_strict, IoError, IoResult};

    pub use crate::canonical_json::{to_canonical_json_bytes, write_atomic, write_canonical_file};
    pub use crate::hasher::{result_id_from_canonical, sha256_canonical, sha256_hex};
    pub use crate::loader::{load_config, parse_config, LegislatureConfig};
}
