//! `Legislature`: the mutable state of one simulated chamber and every
//! operation on it. Randomised operations take the caller's `SimRng`.

use tracing::{debug, info, warn};

use pm_algo::{
    majority_targets, randomize_shares, simulate_floor_vote, FloorVote, MajorityTarget, StateSnapshot,
};
use pm_core::{
    rng::SimRng, variables::check_pct, ElectionOutcome, ElectionSettings, ElectoralSystem, Ideology, Party,
    PartyId,
};
use pm_io::loader::{validate_config, LegislatureConfig};

use crate::election::run_election;
use crate::presets::{default_parties, preset_data, Preset};
use crate::scenarios;
use crate::PipelineError;

pub const DEFAULT_TOTAL_SEATS: u32 = 150;

/// Partial update for one party; `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartyUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub ideology: Option<Ideology>,
    pub seats: Option<u32>,
    pub vote_percentage: Option<f64>,
}

/// Partial update for the election settings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElectionSettingsUpdate {
    pub eligible_voters: Option<u64>,
    pub turnout_pct: Option<f64>,
    pub threshold_pct: Option<f64>,
    pub system: Option<ElectoralSystem>,
}

#[derive(Debug, Clone)]
pub struct Legislature {
    total_seats: u32,
    parties: Vec<Party>,
    coalition: Vec<PartyId>,
    election: ElectionSettings,
    completed_scenarios: Vec<&'static str>,
    last_outcome: Option<ElectionOutcome>,
}

impl Default for Legislature {
    fn default() -> Self {
        Self {
            total_seats: DEFAULT_TOTAL_SEATS,
            parties: default_parties(),
            coalition: Vec::new(),
            election: ElectionSettings::default(),
            completed_scenarios: Vec::new(),
            last_outcome: None,
        }
    }
}

impl Legislature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed config (re-validated here).
    pub fn from_config(cfg: LegislatureConfig) -> Result<Self, PipelineError> {
        validate_config(&cfg)?;
        Ok(Self {
            total_seats: cfg.total_seats,
            parties: cfg.parties,
            coalition: cfg.coalition,
            election: cfg.election,
            completed_scenarios: Vec::new(),
            last_outcome: None,
        })
    }

    pub fn to_config(&self) -> LegislatureConfig {
        LegislatureConfig {
            total_seats: self.total_seats,
            election: self.election,
            parties: self.parties.clone(),
            coalition: self.coalition.clone(),
        }
    }

    // ----- accessors -----

    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn party(&self, id: &PartyId) -> Option<&Party> {
        self.parties.iter().find(|p| &p.id == id)
    }

    pub fn coalition(&self) -> &[PartyId] {
        &self.coalition
    }

    pub fn election(&self) -> &ElectionSettings {
        &self.election
    }

    pub fn completed_scenarios(&self) -> &[&'static str] {
        &self.completed_scenarios
    }

    pub fn last_outcome(&self) -> Option<&ElectionOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn snapshot(&self) -> StateSnapshot<'_> {
        StateSnapshot::new(&self.parties, &self.coalition, self.total_seats)
    }

    // ----- chamber & parties -----

    pub fn set_total_seats(&mut self, n: u32) -> Result<(), PipelineError> {
        if n < 1 {
            warn!(requested = n, "rejected seat count");
            return Err(PipelineError::InvalidSeatCount(n));
        }
        self.total_seats = n;
        Ok(())
    }

    /// Append a Center party with 0 % and a random color; returns its id.
    pub fn add_party(&mut self, rng: &mut SimRng) -> PartyId {
        let id = self.next_party_id();
        let name = format!("New Party {}", self.parties.len() + 1);
        let color = random_party_color(rng);
        debug!(party = %id, %color, "adding party");
        self.parties
            .push(Party::new(id.clone(), name, color, Ideology::Center).with_vote_percentage(0.0));
        id
    }

    pub fn update_party(&mut self, id: &PartyId, update: PartyUpdate) -> Result<(), PipelineError> {
        if let Some(v) = update.vote_percentage {
            if check_pct("vote_percentage", v).is_err() {
                warn!(party = %id, value = v, "rejected vote share");
                return Err(PipelineError::InvalidVoteShare { id: id.clone(), value: v });
            }
        }
        let party = self
            .parties
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| PipelineError::UnknownParty(id.clone()))?;

        if let Some(name) = update.name {
            party.name = name;
        }
        if let Some(color) = update.color {
            party.color = color;
        }
        if let Some(ideology) = update.ideology {
            party.ideology = ideology;
        }
        if let Some(seats) = update.seats {
            party.seats = seats;
        }
        if let Some(v) = update.vote_percentage {
            party.vote_percentage = Some(v);
        }
        Ok(())
    }

    /// Remove a party and its coalition membership.
    pub fn remove_party(&mut self, id: &PartyId) -> Result<Party, PipelineError> {
        let idx = self
            .parties
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| PipelineError::UnknownParty(id.clone()))?;
        self.coalition.retain(|c| c != id);
        Ok(self.parties.remove(idx))
    }

    // ----- coalition -----

    /// Add or remove `id`; returns whether it is now a member.
    pub fn toggle_coalition_member(&mut self, id: &PartyId) -> Result<bool, PipelineError> {
        if self.party(id).is_none() {
            return Err(PipelineError::UnknownParty(id.clone()));
        }
        if let Some(pos) = self.coalition.iter().position(|c| c == id) {
            self.coalition.remove(pos);
            Ok(false)
        } else {
            self.coalition.push(id.clone());
            Ok(true)
        }
    }

    pub fn clear_coalition(&mut self) {
        self.coalition.clear();
    }

    pub fn coalition_seats(&self) -> u32 {
        self.snapshot().coalition_seats()
    }

    pub fn majority_targets(&self) -> [MajorityTarget; 3] {
        majority_targets(self.total_seats, self.coalition_seats())
    }

    // ----- election -----

    /// Merge `update` into the settings; nothing changes if the result is invalid.
    pub fn set_election_settings(&mut self, update: ElectionSettingsUpdate) -> Result<(), PipelineError> {
        let mut next = self.election;
        if let Some(v) = update.eligible_voters {
            next.eligible_voters = v;
        }
        if let Some(v) = update.turnout_pct {
            next.turnout_pct = v;
        }
        if let Some(v) = update.threshold_pct {
            next.threshold_pct = v;
        }
        if let Some(v) = update.system {
            next.system = v;
        }
        if let Err(e) = next.validate_domains() {
            warn!(error = %e, "rejected election settings");
            return Err(e.into());
        }
        self.election = next;
        Ok(())
    }

    pub fn run_election(&mut self) -> Result<&ElectionOutcome, PipelineError> {
        match run_election(&mut self.parties, self.total_seats, &self.election) {
            Ok(outcome) => {
                let stored = self.last_outcome.insert(outcome);
                Ok(&*stored)
            }
            Err(e) => {
                warn!(error = %e, "election not run");
                Err(e)
            }
        }
    }

    /// Replace seats, parties and system/threshold; clears the coalition.
    /// Turnout, electorate and completed scenarios are kept.
    pub fn load_preset(&mut self, preset: Preset) {
        let data = preset_data(preset);
        self.total_seats = data.total_seats;
        self.parties = data.parties;
        self.election.system = data.system;
        self.election.threshold_pct = data.threshold_pct;
        self.coalition.clear();
        self.last_outcome = None;
        info!(preset = %preset, seats = self.total_seats, parties = self.parties.len(), "preset loaded");
    }

    /// Draw new vote shares for every party (see `pm_algo::randomize`).
    pub fn randomize_vote_shares(&mut self, rng: &mut SimRng) {
        let before = rng.words_consumed();
        for (id, share) in randomize_shares(&self.parties, rng) {
            if let Some(p) = self.parties.iter_mut().find(|p| p.id == id) {
                p.vote_percentage = Some(share);
            }
        }
        debug!(draws = %(rng.words_consumed() - before), "vote shares randomized");
    }

    // ----- scenarios & floor vote -----

    /// Record newly satisfied scenarios and return their ids.
    pub fn check_scenarios(&mut self) -> Vec<&'static str> {
        let fresh: Vec<&'static str> = scenarios::satisfied(&self.snapshot())
            .into_iter()
            .filter(|id| !self.completed_scenarios.contains(id))
            .collect();
        for id in &fresh {
            info!(scenario = id, "scenario completed");
        }
        self.completed_scenarios.extend(fresh.iter().copied());
        fresh
    }

    pub fn simulate_floor_vote(&self, title: &str, rng: &mut SimRng) -> FloorVote {
        let before = rng.words_consumed();
        let vote = simulate_floor_vote(title, &self.parties, self.total_seats, rng);
        debug!(draws = %(rng.words_consumed() - before), "floor vote drawn");
        info!(title, yes = vote.yes, no = vote.no, abstain = vote.abstain, passed = vote.passed, "floor vote");
        vote
    }

    // ----- helpers -----

    /// `p<k>` for the smallest k ≥ 1 not already used.
    fn next_party_id(&self) -> PartyId {
        (1u64..)
            .map(PartyId::numbered)
            .find(|id| self.party(id).is_none())
            .unwrap_or_else(|| PartyId::numbered(0))
    }
}

/// `hsl(h, s%, l%)` with hue 0–359, saturation 70–89 %, lightness 50–69 %.
fn random_party_color(rng: &mut SimRng) -> String {
    let hue = rng.gen_range(360).unwrap_or(0);
    let sat = 70 + rng.gen_range(20).unwrap_or(0);
    let light = 50 + rng.gen_range(20).unwrap_or(0);
    format!("hsl({hue}, {sat}%, {light}%)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_core::rng::sim_rng_from_seed;

    fn id(k: u64) -> PartyId {
        PartyId::numbered(k)
    }

    #[test]
    fn defaults() {
        let leg = Legislature::new();
        assert_eq!(leg.total_seats(), 150);
        assert_eq!(leg.parties().len(), 6);
        assert_eq!(leg.election().eligible_voters, 10_000_000);
        assert!(leg.coalition().is_empty());
        assert!(leg.last_outcome().is_none());
    }

    #[test]
    fn seat_count_must_be_positive() {
        let mut leg = Legislature::new();
        assert!(matches!(leg.set_total_seats(0), Err(PipelineError::InvalidSeatCount(0))));
        assert_eq!(leg.total_seats(), 150);
        leg.set_total_seats(1).unwrap();
        assert_eq!(leg.total_seats(), 1);
    }

    #[test]
    fn add_party_fills_first_free_id() {
        let mut leg = Legislature::new();
        leg.remove_party(&id(2)).unwrap();
        let mut rng = sim_rng_from_seed(5);
        let new_id = leg.add_party(&mut rng);
        assert_eq!(new_id, id(2));
        let p = leg.party(&new_id).unwrap();
        assert_eq!(p.name, "New Party 6");
        assert_eq!(p.ideology, Ideology::Center);
        assert_eq!(p.vote_percentage, Some(0.0));
        assert_eq!(p.seats, 0);
        assert!(p.color.starts_with("hsl("));
        assert_eq!(leg.add_party(&mut rng), id(7));
    }

    #[test]
    fn party_color_ranges() {
        let mut rng = sim_rng_from_seed(11);
        for _ in 0..200 {
            let c = random_party_color(&mut rng);
            let inner = c.trim_start_matches("hsl(").trim_end_matches(')');
            let nums: Vec<u32> = inner.split(", ").map(|s| s.trim_end_matches('%').parse().unwrap()).collect();
            assert!(nums[0] < 360);
            assert!((70..90).contains(&nums[1]));
            assert!((50..70).contains(&nums[2]));
        }
    }

    #[test]
    fn update_party_partial() {
        let mut leg = Legislature::new();
        leg.update_party(&id(1), PartyUpdate { vote_percentage: Some(40.0), ..Default::default() })
            .unwrap();
        let p = leg.party(&id(1)).unwrap();
        assert_eq!(p.vote_percentage, Some(40.0));
        assert_eq!(p.name, "Sunrise Party");

        let err = leg
            .update_party(&id(1), PartyUpdate { vote_percentage: Some(101.0), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidVoteShare { .. }));
        assert!(matches!(
            leg.update_party(&id(42), PartyUpdate::default()),
            Err(PipelineError::UnknownParty(_))
        ));
    }

    #[test]
    fn remove_party_leaves_coalition() {
        let mut leg = Legislature::new();
        assert!(leg.toggle_coalition_member(&id(1)).unwrap());
        assert!(leg.toggle_coalition_member(&id(3)).unwrap());
        leg.remove_party(&id(1)).unwrap();
        assert_eq!(leg.coalition(), &[id(3)]);
        assert!(leg.remove_party(&id(1)).is_err());
    }

    #[test]
    fn coalition_toggle_and_targets() {
        let mut leg = Legislature::new();
        leg.toggle_coalition_member(&id(1)).unwrap(); // 45
        leg.toggle_coalition_member(&id(2)).unwrap(); // 35
        assert_eq!(leg.coalition_seats(), 80);
        let t = leg.majority_targets();
        assert_eq!((t[0].target, t[0].achieved), (76, true));
        assert_eq!((t[1].target, t[1].achieved), (100, false));
        assert!(!leg.toggle_coalition_member(&id(2)).unwrap());
        assert_eq!(leg.coalition_seats(), 45);
        leg.clear_coalition();
        assert_eq!(leg.coalition_seats(), 0);
        assert!(leg.toggle_coalition_member(&id(99)).is_err());
    }

    #[test]
    fn scenarios_are_recorded_once() {
        let mut leg = Legislature::new();
        for k in [1, 2] {
            leg.toggle_coalition_member(&id(k)).unwrap();
        }
        assert_eq!(leg.check_scenarios(), vec!["s1"]);
        assert!(leg.check_scenarios().is_empty());
        leg.toggle_coalition_member(&id(3)).unwrap(); // 105 of 150
        assert_eq!(leg.check_scenarios(), vec!["s2"]);
        assert_eq!(leg.completed_scenarios(), &["s1", "s2"]);
    }

    #[test]
    fn settings_merge_is_all_or_nothing() {
        let mut leg = Legislature::new();
        let bad = ElectionSettingsUpdate {
            system: Some(ElectoralSystem::Fptp),
            turnout_pct: Some(140.0),
            ..Default::default()
        };
        assert!(matches!(leg.set_election_settings(bad), Err(PipelineError::InvalidSettings(_))));
        assert_eq!(leg.election().system, ElectoralSystem::DHondt);
        leg.set_election_settings(ElectionSettingsUpdate { threshold_pct: Some(0.0), ..Default::default() })
            .unwrap();
        assert_eq!(leg.election().threshold_pct, 0.0);
        assert_eq!(leg.election().turnout_pct, 75.0);
    }

    #[test]
    fn dutch_preset_election() {
        let mut leg = Legislature::new();
        leg.toggle_coalition_member(&id(1)).unwrap();
        leg.load_preset(Preset::Dutch);
        assert!(leg.coalition().is_empty());
        assert_eq!(leg.election().threshold_pct, 0.67);
        let out = leg.run_election().unwrap().clone();
        assert_eq!(out.seats_awarded(), 150);
        assert_eq!(leg.parties().iter().map(|p| p.seats).sum::<u32>(), 150);
        // Largest party keeps the most seats.
        let pvv = leg.party(&id(3)).unwrap();
        assert!(leg.parties().iter().all(|p| p.seats <= pvv.seats));
        assert_eq!(leg.last_outcome().map(|o| o.result_id.clone()), Some(out.result_id));
    }

    #[test]
    fn senate_preset_is_winner_takes_all() {
        let mut leg = Legislature::new();
        leg.load_preset(Preset::UsSenate);
        leg.run_election().unwrap();
        assert_eq!(leg.party(&id(1)).unwrap().seats, 100);
        assert_eq!(leg.party(&id(2)).unwrap().seats, 0);
    }

    #[test]
    fn randomized_shares_allow_an_election() {
        let mut leg = Legislature::new();
        leg.randomize_vote_shares(&mut sim_rng_from_seed(21));
        let total: f64 = leg.parties().iter().filter_map(|p| p.vote_percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
        let out = leg.run_election().unwrap();
        assert_eq!(out.spoiled_ballots, 0);
    }

    #[test]
    fn rejected_election_keeps_previous_outcome() {
        let mut leg = Legislature::new();
        leg.load_preset(Preset::UsSenate);
        leg.run_election().unwrap();
        leg.update_party(&id(2), PartyUpdate { vote_percentage: Some(60.0), ..Default::default() })
            .unwrap();
        assert!(matches!(leg.run_election(), Err(PipelineError::ElectionRejected(_))));
        assert!(leg.last_outcome().is_some());
    }

    #[test]
    fn floor_vote_counts_every_seat() {
        let leg = Legislature::new();
        let v = leg.simulate_floor_vote("Climate Action Bill", &mut sim_rng_from_seed(1));
        assert_eq!(v.yes + v.no + v.abstain, 150);
        assert_eq!(v.title, "Climate Action Bill");
    }

    #[test]
    fn floor_vote_draws_once_per_party() {
        let leg = Legislature::new();
        let mut rng = sim_rng_from_seed(9);
        leg.simulate_floor_vote("Budget", &mut rng);
        assert_eq!(rng.words_consumed(), leg.parties().len() as u128);
    }

    #[test]
    fn config_round_trip() {
        let mut leg = Legislature::new();
        leg.toggle_coalition_member(&id(4)).unwrap();
        let back = Legislature::from_config(leg.to_config()).unwrap();
        assert_eq!(back.parties(), leg.parties());
        assert_eq!(back.coalition(), leg.coalition());
    }
}
