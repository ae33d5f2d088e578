//! Seat apportionment: one shared threshold filter, one parameterised divisor
//! routine (D'Hondt, Sainte-Laguë) and the national winner-takes-all rule.
//!
//! Contract:
//! - The threshold denominator is the sum over *all* input parties.
//! - Divisor methods return only eligible parties; FPTP returns every input party.
//! - Ties go to the earliest party in input order. No randomness, no errors:
//!   zero votes, zero seats and an empty eligible set all yield zero maps.

pub mod divisor;
pub mod fptp;
pub mod threshold;

pub use divisor::{dhondt, highest_averages, sainte_lague};
pub use fptp::fptp;
pub use threshold::apply_threshold;

use pm_core::{ElectoralSystem, PartyVote, SeatAllocation};

/// Dispatch to the allocation rule for `system`.
pub fn allocate(
    system: ElectoralSystem,
    parties: &[PartyVote],
    total_seats: u32,
    threshold_pct: f64,
) -> SeatAllocation {
    match system {
        ElectoralSystem::DHondt => dhondt(parties, total_seats, threshold_pct),
        ElectoralSystem::SainteLague => sainte_lague(parties, total_seats, threshold_pct),
        ElectoralSystem::Fptp => fptp(parties, total_seats, threshold_pct),
    }
}

/// Sum of all input votes (threshold denominator).
#[inline]
pub(crate) fn total_votes(parties: &[PartyVote]) -> u64 {
    parties.iter().fold(0u64, |acc, p| acc.saturating_add(p.votes))
}
