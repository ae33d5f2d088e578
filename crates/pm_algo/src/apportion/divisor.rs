//! Highest-averages allocation (D'Hondt, Sainte-Laguë).
//!
//! Seats are awarded one at a time to the eligible party with the largest
//! `votes / divisor(seats_so_far)`. The scan runs in input order and only
//! replaces the running best on a strictly larger quotient, so ties go to the
//! earliest party. Quotients are compared without floats (cross-multiply in u128).

use core::cmp::Ordering;

use pm_core::{PartyVote, SeatAllocation};

use super::threshold::apply_threshold;
use super::total_votes;

/// D'Hondt divisor: 1, 2, 3, …
#[inline]
pub fn dhondt_divisor(seats: u32) -> u64 {
    seats as u64 + 1
}

/// Sainte-Laguë divisor: 1, 3, 5, …
#[inline]
pub fn sainte_lague_divisor(seats: u32) -> u64 {
    2 * seats as u64 + 1
}

/// D'Hondt allocation over eligible parties.
pub fn dhondt(parties: &[PartyVote], total_seats: u32, threshold_pct: f64) -> SeatAllocation {
    highest_averages(parties, total_seats, threshold_pct, dhondt_divisor)
}

/// Sainte-Laguë allocation over eligible parties.
pub fn sainte_lague(parties: &[PartyVote], total_seats: u32, threshold_pct: f64) -> SeatAllocation {
    highest_averages(parties, total_seats, threshold_pct, sainte_lague_divisor)
}

/// Shared divisor routine.
///
/// *Notes*:
/// - Every eligible party appears in the result, starting at 0; ineligible ones are absent.
/// - `total_seats == 0` or an empty eligible set returns the zero-initialised map.
/// - Otherwise the values sum to exactly `total_seats`.
pub fn highest_averages(
    parties: &[PartyVote],
    total_seats: u32,
    threshold_pct: f64,
    divisor: fn(u32) -> u64,
) -> SeatAllocation {
    let eligible = apply_threshold(parties, total_votes(parties), threshold_pct);

    // Seat counters parallel to `eligible` (input order drives the tie rule).
    let mut seats: Vec<u32> = vec![0; eligible.len()];

    if !eligible.is_empty() {
        for _round in 0..total_seats {
            let winner = next_award(&eligible, &seats, divisor);
            seats[winner] += 1;
        }
    }

    eligible
        .iter()
        .zip(seats)
        .map(|(p, s)| (p.id.clone(), s))
        .collect()
}

/// Index of the party with the strictly largest quotient (first on ties).
/// `eligible` must be non-empty.
fn next_award(eligible: &[&PartyVote], seats: &[u32], divisor: fn(u32) -> u64) -> usize {
    let mut best = 0usize;
    for i in 1..eligible.len() {
        let ord = cmp_quotients(
            eligible[i].votes,
            divisor(seats[i]),
            eligible[best].votes,
            divisor(seats[best]),
        );
        if ord == Ordering::Greater {
            best = i;
        }
    }
    best
}

/// Compare v_a/d_a vs v_b/d_b without floats.
fn cmp_quotients(v_a: u64, d_a: u64, v_b: u64, d_b: u64) -> Ordering {
    let lhs = (v_a as u128) * (d_b as u128);
    let rhs = (v_b as u128) * (d_a as u128);
    lhs.cmp(&rhs)
}
