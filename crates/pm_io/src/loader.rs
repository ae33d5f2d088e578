//! Loader: read a local legislature config (JSON), validate it, and return a
//! typed `LegislatureConfig` for the orchestration layer. No network I/O.

#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use pm_core::{variables::check_pct, ElectionSettings, Party, PartyId};

use crate::{looks_like_url_strict, IoError};

/// Config files larger than this are refused.
pub const MAX_CONFIG_BYTES: u64 = 4 * 1024 * 1024;

// ----------------------------- Wire-facing type -----------------------------

/// A saved legislature: seat count, election settings, parties and coalition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegislatureConfig {
    #[serde(default = "default_total_seats")]
    pub total_seats: u32,
    #[serde(default)]
    pub election: ElectionSettings,
    pub parties: Vec<Party>,
    #[serde(default)]
    pub coalition: Vec<PartyId>,
}

fn default_total_seats() -> u32 {
    150
}

// ----------------------------- Entry points -----------------------------

/// Read, parse and validate a config file.
pub fn load_config(path: &Path) -> Result<LegislatureConfig, IoError> {
    let raw = path.to_string_lossy();
    if looks_like_url_strict(&raw) {
        return Err(IoError::Path(format!("refusing non-local config path: {raw}")));
    }
    let bytes = read_with_limit(path, MAX_CONFIG_BYTES)?;
    parse_config(&bytes)
}

/// Parse and validate config bytes.
pub fn parse_config(bytes: &[u8]) -> Result<LegislatureConfig, IoError> {
    let cfg: LegislatureConfig = serde_json::from_slice(bytes)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Domain checks serde cannot express.
pub fn validate_config(cfg: &LegislatureConfig) -> Result<(), IoError> {
    if cfg.total_seats < 1 {
        return Err(invalid("/total_seats", "must be at least 1"));
    }
    cfg.election
        .validate_domains()
        .map_err(|e| invalid("/election", e.to_string()))?;

    let mut seen: BTreeSet<&PartyId> = BTreeSet::new();
    for (i, p) in cfg.parties.iter().enumerate() {
        if !seen.insert(&p.id) {
            return Err(invalid(&format!("/parties/{i}/id"), format!("duplicate party id {}", p.id)));
        }
        if p.name.trim().is_empty() {
            return Err(invalid(&format!("/parties/{i}/name"), "must not be empty"));
        }
        if let Some(pct) = p.vote_percentage {
            check_pct("vote_percentage", pct)
                .map_err(|e| invalid(&format!("/parties/{i}/vote_percentage"), e.to_string()))?;
        }
    }

    for (i, id) in cfg.coalition.iter().enumerate() {
        if !seen.contains(id) {
            return Err(invalid(&format!("/coalition/{i}"), format!("unknown party id {id}")));
        }
    }
    Ok(())
}

// ----------------------------- helpers -----------------------------

fn read_with_limit(path: &Path, limit: u64) -> Result<Vec<u8>, IoError> {
    let f = File::open(path).map_err(|e| IoError::Path(format!("{} ({e})", path.display())))?;
    let mut buf = Vec::new();
    f.take(limit + 1)
        .read_to_end(&mut buf)
        .map_err(|e| IoError::Path(format!("{} ({e})", path.display())))?;
    if buf.len() as u64 > limit {
        return Err(IoError::Path(format!("{} exceeds {limit} bytes", path.display())));
    }
    Ok(buf)
}

fn invalid(pointer: &str, msg: impl Into<String>) -> IoError {
    IoError::Invalid { pointer: pointer.to_owned(), msg: msg.into() }
}
