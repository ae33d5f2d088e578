//! Entities shared by the engine and the orchestration layer.
//!
//! `PartyVote` and `SeatAllocation` are transient (one apportionment call);
//! `Party` is the long-lived record the orchestration layer merges results into.

use std::collections::BTreeMap;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::PartyId;
use crate::variables::ElectoralSystem;

/// Seats awarded per party for one apportionment call.
pub type SeatAllocation = BTreeMap<PartyId, u32>;

/// One party's valid vote count for a single election run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartyVote {
    pub id: PartyId,
    pub votes: u64,
}

impl PartyVote {
    pub fn new(id: PartyId, votes: u64) -> Self {
        Self { id, votes }
    }
}

/// Political leaning; drives the floor-vote draw and vote-share randomization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Ideology {
    #[cfg_attr(feature = "serde", serde(rename = "Left", alias = "left"))]
    Left,
    #[cfg_attr(feature = "serde", serde(rename = "Center-Left", alias = "center_left"))]
    CenterLeft,
    #[cfg_attr(feature = "serde", serde(rename = "Center", alias = "center"))]
    Center,
    #[cfg_attr(feature = "serde", serde(rename = "Center-Right", alias = "center_right"))]
    CenterRight,
    #[cfg_attr(feature = "serde", serde(rename = "Right", alias = "right"))]
    Right,
}

impl Ideology {
    pub const ALL: [Ideology; 5] = [
        Ideology::Left,
        Ideology::CenterLeft,
        Ideology::Center,
        Ideology::CenterRight,
        Ideology::Right,
    ];

    /// Wire/display label.
    pub fn label(self) -> &'static str {
        match self {
            Ideology::Left => "Left",
            Ideology::CenterLeft => "Center-Left",
            Ideology::Center => "Center",
            Ideology::CenterRight => "Center-Right",
            Ideology::Right => "Right",
        }
    }

    /// Left and Right (not their center variants).
    pub fn is_extreme(self) -> bool {
        matches!(self, Ideology::Left | Ideology::Right)
    }
}

impl Default for Ideology {
    fn default() -> Self {
        Ideology::Center
    }
}

impl fmt::Display for Ideology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Ideology {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Ideology::ALL
            .into_iter()
            .find(|i| i.label().eq_ignore_ascii_case(t) || i.label().replace('-', "_").eq_ignore_ascii_case(t))
            .ok_or_else(|| CoreError::UnknownToken { kind: "ideology", token: s.to_owned() })
    }
}

/// A party record as held by the legislature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seats: u32,
    pub color: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ideology: Ideology,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub votes: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub vote_percentage: Option<f64>,
}

impl Party {
    pub fn new(id: PartyId, name: impl Into<String>, color: impl Into<String>, ideology: Ideology) -> Self {
        Self {
            id,
            name: name.into(),
            seats: 0,
            color: color.into(),
            ideology,
            votes: None,
            vote_percentage: None,
        }
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.seats = seats;
        self
    }

    pub fn with_vote_percentage(mut self, pct: f64) -> Self {
        self.vote_percentage = Some(pct);
        self
    }
}

/// One row of the results table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElectionResult {
    pub party_id: PartyId,
    pub votes: u64,
    /// Share of valid votes, 0..=100.
    pub percentage: f64,
    pub seats: u32,
}

/// Everything one `run_election` produced, in party input order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElectionOutcome {
    /// "RES:" + sha256 of the canonical outcome body.
    pub result_id: String,
    pub system: ElectoralSystem,
    pub threshold_pct: f64,
    pub total_seats: u32,
    pub votes_cast: u64,
    pub valid_votes: u64,
    pub spoiled_ballots: u64,
    pub results: Vec<ElectionResult>,
    pub allocation: SeatAllocation,
}

impl ElectionOutcome {
    pub fn seats_awarded(&self) -> u64 {
        self.allocation.values().map(|&s| s as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideology_parses_labels_and_snake_tokens() {
        assert_eq!("Center-Left".parse::<Ideology>().unwrap(), Ideology::CenterLeft);
        assert_eq!("center_right".parse::<Ideology>().unwrap(), Ideology::CenterRight);
        assert_eq!("RIGHT".parse::<Ideology>().unwrap(), Ideology::Right);
        assert!("libertarian".parse::<Ideology>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn party_wire_shape() {
        let json = r#"{"id":"p1","name":"Sunrise Party","color":"hsl(45, 85%, 60%)","ideology":"center_left","vote_percentage":12.5}"#;
        let p: Party = serde_json::from_str(json).unwrap();
        assert_eq!(p.ideology, Ideology::CenterLeft);
        assert_eq!(p.seats, 0);
        assert_eq!(p.vote_percentage, Some(12.5));
        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["ideology"], "Center-Left");
        assert!(back.get("votes").is_none());
    }
}
