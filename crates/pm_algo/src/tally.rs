//! Vote tally: turn per-party vote shares plus turnout into integer vote counts.
//!
//! Shares are percentages of ballots cast; whatever the shares leave uncovered
//! is counted as spoiled. Party votes are scaled to the valid pool and rounded
//! half away from zero.

use pm_core::{PartyId, PartyVote};

/// Float slack when checking the share total against 100.
const SHARE_TOTAL_EPS: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TallyError {
    #[error("vote shares total {total_pct}% which exceeds 100%")]
    SharesExceedTotal { total_pct: f64 },
    #[error("{what} must be finite in [0,100], got {value}")]
    InvalidPercentage { what: String, value: f64 },
}

/// Integer counts for one election run (input order preserved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTally {
    pub party_votes: Vec<PartyVote>,
    pub votes_cast: u64,
    pub valid_votes: u64,
    pub spoiled_ballots: u64,
}

impl VoteTally {
    /// Sum of all party votes (may differ from `valid_votes` by rounding).
    pub fn counted_votes(&self) -> u64 {
        self.party_votes.iter().map(|p| p.votes).sum()
    }
}

pub fn tally_votes(
    shares: &[(PartyId, f64)],
    eligible_voters: u64,
    turnout_pct: f64,
) -> Result<VoteTally, TallyError> {
    check_pct("turnout", turnout_pct)?;
    for (id, pct) in shares {
        check_pct(&format!("vote share of {id}"), *pct)?;
    }

    let total_pct: f64 = shares.iter().map(|(_, pct)| pct).sum();
    if total_pct > 100.0 + SHARE_TOTAL_EPS {
        return Err(TallyError::SharesExceedTotal { total_pct });
    }
    let total_pct = total_pct.min(100.0);

    let cast = eligible_voters as f64 * turnout_pct / 100.0;
    let spoiled = cast * (100.0 - total_pct) / 100.0;
    let valid = cast - spoiled;
    let denom = if total_pct > 0.0 { total_pct } else { 1.0 };

    let party_votes = shares
        .iter()
        .map(|(id, pct)| PartyVote::new(id.clone(), round_count(valid * pct / denom)))
        .collect();

    let votes_cast = round_count(cast);
    let valid_votes = round_count(valid).min(votes_cast);
    Ok(VoteTally {
        party_votes,
        votes_cast,
        valid_votes,
        spoiled_ballots: votes_cast - valid_votes,
    })
}

/// Percentage of valid votes, 0 when nothing was valid.
pub fn vote_share_pct(votes: u64, valid_votes: u64) -> f64 {
    if valid_votes == 0 {
        return 0.0;
    }
    votes as f64 / valid_votes as f64 * 100.0
}

#[inline]
fn round_count(x: f64) -> u64 {
    if x.is_finite() && x > 0.0 {
        x.round() as u64
    } else {
        0
    }
}

fn check_pct(what: &str, value: f64) -> Result<(), TallyError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(TallyError::InvalidPercentage { what: what.to_owned(), value });
    }
    Ok(())
}
