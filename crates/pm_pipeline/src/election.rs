//! ELECTION: tally → apportion → merge into party records → outcome with a
//! content-addressed id. Deterministic for a given party list and settings.

use serde::Serialize;
use tracing::{debug, info};

use pm_algo::{allocate, tally_votes, vote_share_pct};
use pm_core::{
    ElectionOutcome, ElectionResult, ElectionSettings, ElectoralSystem, Party, PartyId, SeatAllocation,
};
use pm_io::hasher::result_id_from_canonical;

use crate::PipelineError;

/// Hashed body of an outcome (everything except the id itself).
#[derive(Serialize)]
struct OutcomeBody<'a> {
    system: ElectoralSystem,
    threshold_pct: f64,
    total_seats: u32,
    votes_cast: u64,
    valid_votes: u64,
    spoiled_ballots: u64,
    results: &'a [ElectionResult],
    allocation: &'a SeatAllocation,
}

/// Run one election over `parties` and write seats and votes back into them.
///
/// Parties without a vote share count as 0 %. Every party gets a seat count
/// (absent from the allocation → 0). Rejected elections leave `parties` untouched.
pub fn run_election(
    parties: &mut [Party],
    total_seats: u32,
    settings: &ElectionSettings,
) -> Result<ElectionOutcome, PipelineError> {
    settings.validate_domains()?;

    let shares: Vec<(PartyId, f64)> = parties
        .iter()
        .map(|p| (p.id.clone(), p.vote_percentage.unwrap_or(0.0)))
        .collect();
    let tally = tally_votes(&shares, settings.eligible_voters, settings.turnout_pct)?;

    debug!(
        system = %settings.system,
        total_seats,
        threshold_pct = settings.threshold_pct,
        parties = tally.party_votes.len(),
        valid_votes = tally.valid_votes,
        "apportioning seats"
    );
    let allocation = allocate(settings.system, &tally.party_votes, total_seats, settings.threshold_pct);

    // Merge back in input order; tally preserves that order.
    let mut results = Vec::with_capacity(parties.len());
    for (party, pv) in parties.iter_mut().zip(&tally.party_votes) {
        let seats = allocation.get(&party.id).copied().unwrap_or(0);
        party.seats = seats;
        party.votes = Some(pv.votes);
        results.push(ElectionResult {
            party_id: party.id.clone(),
            votes: pv.votes,
            percentage: vote_share_pct(pv.votes, tally.valid_votes),
            seats,
        });
    }

    let body = OutcomeBody {
        system: settings.system,
        threshold_pct: settings.threshold_pct,
        total_seats,
        votes_cast: tally.votes_cast,
        valid_votes: tally.valid_votes,
        spoiled_ballots: tally.spoiled_ballots,
        results: &results,
        allocation: &allocation,
    };
    let result_id = result_id_from_canonical(&body)?;

    let outcome = ElectionOutcome {
        result_id,
        system: settings.system,
        threshold_pct: settings.threshold_pct,
        total_seats,
        votes_cast: tally.votes_cast,
        valid_votes: tally.valid_votes,
        spoiled_ballots: tally.spoiled_ballots,
        results,
        allocation,
    };
    info!(
        result_id = %outcome.result_id,
        system = %outcome.system,
        seats_awarded = outcome.seats_awarded(),
        spoiled = outcome.spoiled_ballots,
        "election complete"
    );
    Ok(outcome)
}
