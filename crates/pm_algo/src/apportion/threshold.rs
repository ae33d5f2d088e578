//! Entry threshold shared by every allocation rule.

use pm_core::PartyVote;

/// Parties whose share of `total_votes` is at least `threshold_pct` percent.
///
/// Inclusive on the share itself (`votes / total_votes * 100 >= threshold_pct`)
/// and stable in input order. `total_votes == 0` keeps nobody, whatever the
/// threshold.
pub fn apply_threshold(parties: &[PartyVote], total_votes: u64, threshold_pct: f64) -> Vec<&PartyVote> {
    if total_votes == 0 {
        return Vec::new();
    }
    let total = total_votes as f64;
    parties
        .iter()
        .filter(|p| p.votes as f64 / total * 100.0 >= threshold_pct)
        .collect()
}
