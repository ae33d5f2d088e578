// crates/pm_cli/src/args.rs
//
// Offline CLI argument surface (types + validation helpers).
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - At most one of: --config  XOR  --preset (neither → default chamber)
// - Overrides: --seats, --system, --threshold, --turnout, --voters
// - Output: --render [json|csv|html]* requires --out
// - Seed is a u64 (decimal or 0x-hex up to 16 nybbles), default 0
// - --validate-only loads and applies overrides without running an election

use clap::Parser;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use pm_core::{ElectoralSystem, PartyId};
use pm_pipeline::Preset;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "parliament",
    disable_help_subcommand = true,
    about = "Offline, deterministic legislature and election simulator"
)]
pub struct Args {
    // --- Starting state ---
    /// Legislature config JSON (mutually exclusive with --preset).
    #[arg(long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,
    /// Built-in chamber: dutch | us-senate.
    #[arg(long, value_parser = parse_preset)]
    pub preset: Option<Preset>,

    // --- Overrides ---
    /// Total seats in the chamber (≥ 1).
    #[arg(long)]
    pub seats: Option<u32>,
    /// Electoral system: dhondt | sainte-lague | fptp.
    #[arg(long, value_parser = parse_system)]
    pub system: Option<ElectoralSystem>,
    /// Entry threshold in percent of valid votes.
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Turnout in percent of eligible voters.
    #[arg(long)]
    pub turnout: Option<f64>,
    /// Eligible voters.
    #[arg(long)]
    pub voters: Option<u64>,

    // --- Simulation ---
    /// Draw random vote shares before the election.
    #[arg(long)]
    pub randomize: bool,
    /// Coalition member party id (repeatable); replaces any coalition from --config.
    #[arg(long = "coalition", value_parser = parse_party_id)]
    pub coalition: Vec<PartyId>,
    /// Run a floor vote on this motion after the election.
    #[arg(long)]
    pub motion: Option<String>,
    /// RNG seed. Accepts decimal u64 or 0x-hex (≤16 hex digits).
    #[arg(long, value_parser = parse_seed, default_value = "0")]
    pub seed: u64,

    // --- Output & rendering ---
    /// Output directory for result.json and rendered exports.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Export(s) to write into --out.
    #[arg(long, value_parser = ["json", "csv", "html"])]
    pub render: Vec<String>,

    /// Load and validate inputs only; do not run the election.
    #[arg(long)]
    pub validate_only: bool,

    /// Only log warnings and errors.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    Missing(&'static str),
    NonLocalPath(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Missing(s) => write!(f, "missing required flag: {s}"),
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    validate(args)
}

/// Flag checks that clap cannot express, then path normalization.
pub fn validate(mut args: Args) -> Result<Args, CliError> {
    for p in [args.config.as_deref(), args.out.as_deref()].into_iter().flatten() {
        ensure_local_path(p)?;
    }
    if !args.render.is_empty() && args.out.is_none() {
        return Err(CliError::Missing("--out (required by --render)"));
    }
    args.config = args.config.take().map(|p| normalize_path(&p));
    args.out = args.out.take().map(|p| normalize_path(&p));
    Ok(args)
}

/// Seed parser: decimal u64 or 0x-hex (1..=16 nybbles).
pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed".into());
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("hex seed must be 1..16 hex digits".into());
        }
        u64::from_str_radix(rest, 16).map_err(|_| "hex seed out of range".into())
    } else {
        s.parse::<u64>().map_err(|_| "decimal seed must be a valid u64".into())
    }
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    s.parse().map_err(|e: pm_pipeline::PipelineError| e.to_string())
}

fn parse_system(s: &str) -> Result<ElectoralSystem, String> {
    s.parse().map_err(|e: pm_core::CoreError| e.to_string())
}

fn parse_party_id(s: &str) -> Result<PartyId, String> {
    s.parse().map_err(|e: pm_core::CoreError| e.to_string())
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

/// Ensure a provided path string is local (no scheme); existence is checked by the loader.
#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

/// Best-effort normalization to an absolute path.
/// If canonicalize fails (e.g., path doesn't exist yet), produce an absolute path relative to CWD.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}
