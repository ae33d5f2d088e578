// crates/pm_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure algorithms over borrowed inputs. No I/O, no global state; the only
//! randomness comes from a caller-supplied `pm_core::rng::SimRng`.

// Core types used across the algorithm surface
pub use pm_core::{ElectoralSystem, Ideology, Party, PartyId, PartyVote, SeatAllocation};

// ----------------------------- Apportionment ---------------------------------

pub mod apportion;

pub use apportion::{allocate, apply_threshold, dhondt, fptp, highest_averages, sainte_lague};

// ----------------------------- Tally -----------------------------------------

pub mod tally;

pub use tally::{tally_votes, vote_share_pct, TallyError, VoteTally};

// ----------------------------- Coalition & floor vote ------------------------

pub mod coalition;
pub mod floor_vote;
pub mod randomize;

pub use coalition::{majority_required, majority_targets, MajorityKind, MajorityTarget, StateSnapshot};
pub use floor_vote::{draw_choice, simulate_floor_vote, FloorVote, PartyBallot, VoteChoice};
pub use randomize::randomize_shares;
