//! pm_core: Core types, domains and the seeded RNG for the legislature simulator.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! workspace (`pm_algo`, `pm_io`, `pm_pipeline`, `pm_report`, `pm_cli`).
//!
//! - Registry token: `PartyId`
//! - Entities: `Party`, `Ideology`, `PartyVote`, `SeatAllocation`, outcomes
//! - Settings: `ElectoralSystem`, `ElectionSettings` (+ domain validation)
//! - Seedable RNG (ChaCha20) for simulation draws only
//!
//! Serialization derives are gated behind the `serde` feature (on by default).

#![forbid(unsafe_code)]

pub mod errors;
pub mod ids;
pub mod entities;
pub mod variables;
pub mod rng;

pub use errors::CoreError;
pub use ids::PartyId;
pub use entities::{ElectionOutcome, ElectionResult, Ideology, Party, PartyVote, SeatAllocation};
pub use variables::{ElectionSettings, ElectoralSystem};
