//! National winner-takes-all (first past the post).
//!
//! Contract:
//! - Every input party is a key, initialised to 0.
//! - The eligible party with the strictly greatest vote count takes all seats;
//!   ties go to the earliest in input order.
//! - Empty eligible set → all-zero map.

use pm_core::{PartyVote, SeatAllocation};

use super::threshold::apply_threshold;
use super::total_votes;

pub fn fptp(parties: &[PartyVote], total_seats: u32, threshold_pct: f64) -> SeatAllocation {
    let mut alloc: SeatAllocation = parties.iter().map(|p| (p.id.clone(), 0)).collect();

    let eligible = apply_threshold(parties, total_votes(parties), threshold_pct);
    if let Some(winner) = top_by_votes(&eligible) {
        alloc.insert(winner.id.clone(), total_seats);
    }
    alloc
}

/// First party holding the maximum vote count.
fn top_by_votes<'a>(eligible: &[&'a PartyVote]) -> Option<&'a PartyVote> {
    let mut best: Option<&'a PartyVote> = None;
    for &p in eligible {
        match best {
            Some(b) if p.votes <= b.votes => {}
            _ => best = Some(p),
        }
    }
    best
}
