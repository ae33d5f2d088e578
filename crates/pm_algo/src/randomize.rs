//! Random vote shares in whole percent, summing to 100.
//!
//! Parties are shuffled; every party except the last draws
//! `round(r * min(rem, rem * max_share))` from what remains, with `max_share`
//! 0.4 for Left/Right and 0.25 otherwise. The last party takes the remainder
//! rounded to one decimal.

use pm_core::{rng::SimRng, Party, PartyId};

const EXTREME_MAX_SHARE: f64 = 0.4;
const DEFAULT_MAX_SHARE: f64 = 0.25;

/// New vote shares keyed by party id, in shuffled draw order.
pub fn randomize_shares(parties: &[Party], rng: &mut SimRng) -> Vec<(PartyId, f64)> {
    let mut order: Vec<&Party> = parties.iter().collect();
    rng.shuffle_in_place(&mut order);

    let mut remaining = 100.0_f64;
    let last = order.len().saturating_sub(1);
    let mut out = Vec::with_capacity(order.len());
    for (i, p) in order.into_iter().enumerate() {
        if i == last {
            out.push((p.id.clone(), (remaining * 10.0).round() / 10.0));
        } else {
            let max_share = if p.ideology.is_extreme() { EXTREME_MAX_SHARE } else { DEFAULT_MAX_SHARE };
            let cap = remaining.min(remaining * max_share);
            let share = (rng.next_unit_f64() * cap).round();
            remaining -= share;
            out.push((p.id.clone(), share));
        }
    }
    out
}
