//! Simplified floor vote: each party votes as a bloc, drawn from an
//! ideology-dependent distribution; seats are tallied per choice.

use core::fmt;

use pm_core::{rng::SimRng, Ideology, Party, PartyId};

use crate::coalition::majority_required;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChoice {
    Yes,
    No,
    Abstain,
}

impl VoteChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteChoice::Yes => "yes",
            VoteChoice::No => "no",
            VoteChoice::Abstain => "abstain",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One party's bloc vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyBallot {
    pub party_id: PartyId,
    pub choice: VoteChoice,
    pub seats: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloorVote {
    pub title: String,
    pub ballots: Vec<PartyBallot>,
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
    /// floor(S/2) + 1; informational, passing only needs yes > no.
    pub majority_required: u32,
    pub passed: bool,
}

/// Map a uniform draw `r` in [0,1) to a choice for `ideology`.
///
/// Left, Center-Left: yes < 0.85 ≤ no < 0.95 ≤ abstain.
/// Right, Center-Right: no < 0.85 ≤ yes < 0.95 ≤ abstain.
/// Center: yes < 0.5 ≤ no < 0.9 ≤ abstain.
pub fn draw_choice(ideology: Ideology, r: f64) -> VoteChoice {
    let (first, second, cut1, cut2) = match ideology {
        Ideology::Left | Ideology::CenterLeft => (VoteChoice::Yes, VoteChoice::No, 0.85, 0.95),
        Ideology::Right | Ideology::CenterRight => (VoteChoice::No, VoteChoice::Yes, 0.85, 0.95),
        Ideology::Center => (VoteChoice::Yes, VoteChoice::No, 0.5, 0.9),
    };
    if r < cut1 {
        first
    } else if r < cut2 {
        second
    } else {
        VoteChoice::Abstain
    }
}

/// One draw per party, in input order.
pub fn simulate_floor_vote(title: &str, parties: &[Party], total_seats: u32, rng: &mut SimRng) -> FloorVote {
    let ballots: Vec<PartyBallot> = parties
        .iter()
        .map(|p| PartyBallot {
            party_id: p.id.clone(),
            choice: draw_choice(p.ideology, rng.next_unit_f64()),
            seats: p.seats,
        })
        .collect();

    let (mut yes, mut no, mut abstain) = (0u32, 0u32, 0u32);
    for b in &ballots {
        let slot = match b.choice {
            VoteChoice::Yes => &mut yes,
            VoteChoice::No => &mut no,
            VoteChoice::Abstain => &mut abstain,
        };
        *slot = slot.saturating_add(b.seats);
    }

    FloorVote {
        title: title.to_owned(),
        ballots,
        yes,
        no,
        abstain,
        majority_required: majority_required(total_seats),
        passed: yes > no,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_core::rng::sim_rng_from_seed;

    #[test]
    fn draw_bands() {
        assert_eq!(draw_choice(Ideology::Left, 0.0), VoteChoice::Yes);
        assert_eq!(draw_choice(Ideology::CenterLeft, 0.85), VoteChoice::No);
        assert_eq!(draw_choice(Ideology::Left, 0.95), VoteChoice::Abstain);
        assert_eq!(draw_choice(Ideology::Right, 0.84), VoteChoice::No);
        assert_eq!(draw_choice(Ideology::CenterRight, 0.9), VoteChoice::Yes);
        assert_eq!(draw_choice(Ideology::Right, 0.99), VoteChoice::Abstain);
        assert_eq!(draw_choice(Ideology::Center, 0.49), VoteChoice::Yes);
        assert_eq!(draw_choice(Ideology::Center, 0.5), VoteChoice::No);
        assert_eq!(draw_choice(Ideology::Center, 0.9), VoteChoice::Abstain);
    }

    fn parties() -> Vec<Party> {
        vec![
            Party::new("p1".parse().unwrap(), "L", "hsl(0, 0%, 0%)", Ideology::Left).with_seats(60),
            Party::new("p2".parse().unwrap(), "R", "hsl(0, 0%, 0%)", Ideology::Right).with_seats(50),
            Party::new("p3".parse().unwrap(), "C", "hsl(0, 0%, 0%)", Ideology::Center).with_seats(40),
        ]
    }

    #[test]
    fn seats_are_conserved_and_deterministic() {
        let ps = parties();
        let a = simulate_floor_vote("Climate Action Bill", &ps, 150, &mut sim_rng_from_seed(9));
        let b = simulate_floor_vote("Climate Action Bill", &ps, 150, &mut sim_rng_from_seed(9));
        assert_eq!(a, b);
        assert_eq!(a.yes + a.no + a.abstain, 150);
        assert_eq!(a.ballots.len(), 3);
        assert_eq!(a.majority_required, 76);
        assert_eq!(a.passed, a.yes > a.no);
    }

    #[test]
    fn no_parties_fails() {
        let v = simulate_floor_vote("Empty", &[], 10, &mut sim_rng_from_seed(1));
        assert_eq!((v.yes, v.no, v.abstain), (0, 0, 0));
        assert!(!v.passed);
    }
}
