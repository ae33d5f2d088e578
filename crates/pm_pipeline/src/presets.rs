//! Built-in starting points: the default six-party chamber and two real-world presets.

use core::fmt;
use core::str::FromStr;

use pm_core::{ElectoralSystem, Ideology, Party, PartyId};

use crate::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Tweede Kamer: 150 seats, D'Hondt, 0.67 % threshold.
    Dutch,
    /// US Senate: 100 seats, FPTP, no threshold.
    UsSenate,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Dutch, Preset::UsSenate];

    pub fn token(self) -> &'static str {
        match self {
            Preset::Dutch => "dutch",
            Preset::UsSenate => "us-senate",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Preset {
    type Err = PipelineError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "dutch" => Ok(Preset::Dutch),
            "us-senate" => Ok(Preset::UsSenate),
            _ => Err(PipelineError::Config(format!("unknown preset '{s}' (expected dutch|us-senate)"))),
        }
    }
}

/// What a preset replaces in the legislature.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetData {
    pub total_seats: u32,
    pub parties: Vec<Party>,
    pub system: ElectoralSystem,
    pub threshold_pct: f64,
}

fn party(k: u64, name: &str, seats: u32, color: &str, ideology: Ideology) -> Party {
    Party::new(PartyId::numbered(k), name, color, ideology).with_seats(seats)
}

pub fn preset_data(preset: Preset) -> PresetData {
    match preset {
        Preset::Dutch => PresetData {
            total_seats: 150,
            parties: vec![
                party(1, "VVD", 24, "hsl(210, 100%, 45%)", Ideology::CenterRight).with_vote_percentage(15.2),
                party(2, "GroenLinks-PvdA", 25, "hsl(120, 60%, 40%)", Ideology::Left).with_vote_percentage(15.8),
                party(3, "PVV", 37, "hsl(50, 100%, 50%)", Ideology::Right).with_vote_percentage(23.5),
                party(4, "NSC", 20, "hsl(30, 90%, 50%)", Ideology::Center).with_vote_percentage(12.9),
                party(5, "D66", 9, "hsl(150, 80%, 45%)", Ideology::CenterLeft).with_vote_percentage(6.2),
            ],
            system: ElectoralSystem::DHondt,
            threshold_pct: 0.67,
        },
        Preset::UsSenate => PresetData {
            total_seats: 100,
            parties: vec![
                party(1, "Democrats", 51, "hsl(220, 80%, 60%)", Ideology::CenterLeft).with_vote_percentage(49.0),
                party(2, "Republicans", 49, "hsl(0, 80%, 60%)", Ideology::CenterRight).with_vote_percentage(48.0),
            ],
            system: ElectoralSystem::Fptp,
            threshold_pct: 0.0,
        },
    }
}

/// The six parties a fresh legislature starts with (no vote shares yet).
pub fn default_parties() -> Vec<Party> {
    vec![
        party(1, "Sunrise Party", 45, "hsl(45, 85%, 60%)", Ideology::CenterLeft),
        party(2, "Blue Wave Alliance", 35, "hsl(210, 80%, 65%)", Ideology::CenterRight),
        party(3, "Green Growth", 25, "hsl(120, 70%, 50%)", Ideology::Left),
        party(4, "Tradition Union", 20, "hsl(0, 60%, 55%)", Ideology::Right),
        party(5, "Central Path", 15, "hsl(300, 50%, 60%)", Ideology::Center),
        party(6, "Independents", 10, "hsl(0, 0%, 50%)", Ideology::Center),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_tokens() {
        assert_eq!("dutch".parse::<Preset>().unwrap(), Preset::Dutch);
        assert_eq!("US_Senate".parse::<Preset>().unwrap(), Preset::UsSenate);
        assert!("uk".parse::<Preset>().is_err());
        for p in Preset::ALL {
            assert_eq!(p.token().parse::<Preset>().unwrap(), p);
        }
    }

    #[test]
    fn preset_seats_match_chamber_size() {
        let us = preset_data(Preset::UsSenate);
        assert_eq!(us.parties.iter().map(|p| p.seats).sum::<u32>(), us.total_seats);
        let nl = preset_data(Preset::Dutch);
        assert_eq!(nl.parties.len(), 5);
        assert_eq!(nl.parties[2].name, "PVV");
        assert_eq!(nl.parties[2].vote_percentage, Some(23.5));
    }

    #[test]
    fn defaults_fill_150() {
        let ps = default_parties();
        assert_eq!(ps.len(), 6);
        assert_eq!(ps.iter().map(|p| p.seats).sum::<u32>(), 150);
        assert!(ps.iter().all(|p| p.vote_percentage.is_none()));
    }
}
