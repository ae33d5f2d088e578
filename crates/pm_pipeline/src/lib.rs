//! pm_pipeline: legislature state and the operations that mutate it.
//!
//! The algorithm crates stay pure; this crate owns the mutable state, runs the
//! election flow (tally → apportion → merge → result id) and records scenario
//! progress. No file I/O happens here; config values arrive already parsed.

#![forbid(unsafe_code)]

use thiserror::Error;

use pm_algo::TallyError;
use pm_core::{CoreError, PartyId};
use pm_io::IoError;

pub mod election;
pub mod legislature;
pub mod presets;
pub mod scenarios;

pub use election::run_election;
pub use legislature::{ElectionSettingsUpdate, Legislature, PartyUpdate};
pub use presets::{default_parties, Preset, PresetData};
pub use scenarios::{Scenario, SCENARIOS};

pub use pm_algo::{FloorVote, MajorityKind, MajorityTarget, VoteChoice};

/// Single error surface for the orchestration layer.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("total seats must be at least 1, got {0}")]
    InvalidSeatCount(u32),

    #[error("unknown party id {0}")]
    UnknownParty(PartyId),

    #[error("vote share for {id} must be finite in [0,100], got {value}")]
    InvalidVoteShare { id: PartyId, value: f64 },

    #[error("invalid election settings: {0}")]
    InvalidSettings(String),

    /// The election was refused before any seat was allocated.
    #[error("election rejected: {0}")]
    ElectionRejected(String),

    #[error("config: {0}")]
    Config(String),

    #[error("build: {0}")]
    Build(String),
}

impl From<TallyError> for PipelineError {
    fn from(e: TallyError) -> Self {
        match e {
            TallyError::SharesExceedTotal { .. } => PipelineError::ElectionRejected(e.to_string()),
            TallyError::InvalidPercentage { .. } => PipelineError::InvalidSettings(e.to_string()),
        }
    }
}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        PipelineError::InvalidSettings(e.to_string())
    }
}

impl From<IoError> for PipelineError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Invalid { pointer, msg } => PipelineError::Config(format!("{pointer}: {msg}")),
            IoError::Json { pointer, msg } => PipelineError::Build(format!("json {pointer}: {msg}")),
            IoError::Path(m) => PipelineError::Build(format!("path: {m}")),
        }
    }
}
