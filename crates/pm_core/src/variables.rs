//! variables.rs: election settings, the electoral-system enum, and domain validation.
//!
//! Wire tokens are explicit: the display labels are canonical on output, the
//! short snake_case tokens are accepted on input (config files, CLI flags).

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// ------------ Canonical enums (wire tokens explicit) ------------

/// The three recognised seat allocation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElectoralSystem {
    /// Highest averages, divisors 1, 2, 3, …
    #[cfg_attr(feature = "serde", serde(rename = "D'Hondt", alias = "dhondt"))]
    DHondt,
    /// Highest averages, divisors 1, 3, 5, …
    #[cfg_attr(feature = "serde", serde(rename = "Sainte-Laguë", alias = "sainte_lague"))]
    SainteLague,
    /// National winner-takes-all.
    #[cfg_attr(feature = "serde", serde(rename = "First-Past-The-Post", alias = "fptp"))]
    Fptp,
}

impl ElectoralSystem {
    pub const ALL: [ElectoralSystem; 3] =
        [ElectoralSystem::DHondt, ElectoralSystem::SainteLague, ElectoralSystem::Fptp];

    pub fn label(self) -> &'static str {
        match self {
            ElectoralSystem::DHondt => "D'Hondt",
            ElectoralSystem::SainteLague => "Sainte-Laguë",
            ElectoralSystem::Fptp => "First-Past-The-Post",
        }
    }

    /// Short ASCII token (CLI flags, file names).
    pub fn token(self) -> &'static str {
        match self {
            ElectoralSystem::DHondt => "dhondt",
            ElectoralSystem::SainteLague => "sainte_lague",
            ElectoralSystem::Fptp => "fptp",
        }
    }

    /// True for the two divisor methods.
    pub fn is_proportional(self) -> bool {
        !matches!(self, ElectoralSystem::Fptp)
    }
}

impl Default for ElectoralSystem {
    fn default() -> Self {
        ElectoralSystem::DHondt
    }
}

impl fmt::Display for ElectoralSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ElectoralSystem {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let norm = t.to_ascii_lowercase().replace('-', "_");
        ElectoralSystem::ALL
            .into_iter()
            .find(|sys| sys.label() == t || sys.token() == norm)
            .ok_or_else(|| CoreError::UnknownToken { kind: "electoral system", token: s.to_owned() })
    }
}

/// ------------ Settings ------------

/// Election configuration held by the legislature and fed to the tally + engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElectionSettings {
    pub eligible_voters: u64,
    /// 0..=100
    pub turnout_pct: f64,
    /// 0..=100, inclusive entry threshold on share of valid votes.
    pub threshold_pct: f64,
    pub system: ElectoralSystem,
}

impl Default for ElectionSettings {
    fn default() -> Self {
        Self {
            eligible_voters: 10_000_000,
            turnout_pct: 75.0,
            threshold_pct: 5.0,
            system: ElectoralSystem::DHondt,
        }
    }
}

impl ElectionSettings {
    /// Validate numeric domains (percentages finite and in [0, 100]).
    pub fn validate_domains(&self) -> Result<(), CoreError> {
        check_pct("turnout_pct", self.turnout_pct)?;
        check_pct("threshold_pct", self.threshold_pct)?;
        Ok(())
    }
}

/// Percent domain check shared with party vote shares.
pub fn check_pct(name: &str, v: f64) -> Result<(), CoreError> {
    if !v.is_finite() || !(0.0..=100.0).contains(&v) {
        return Err(CoreError::DomainOutOfRange(format!("{name} must be finite in [0,100], got {v}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_tokens() {
        assert_eq!("D'Hondt".parse::<ElectoralSystem>().unwrap(), ElectoralSystem::DHondt);
        assert_eq!("sainte-lague".parse::<ElectoralSystem>().unwrap(), ElectoralSystem::SainteLague);
        assert_eq!("Sainte-Laguë".parse::<ElectoralSystem>().unwrap(), ElectoralSystem::SainteLague);
        assert_eq!("FPTP".parse::<ElectoralSystem>().unwrap(), ElectoralSystem::Fptp);
        assert!("stv".parse::<ElectoralSystem>().is_err());
        assert!(!ElectoralSystem::Fptp.is_proportional());
    }

    #[test]
    fn settings_domains() {
        let mut s = ElectionSettings::default();
        assert!(s.validate_domains().is_ok());
        s.threshold_pct = 100.0;
        assert!(s.validate_domains().is_ok());
        s.threshold_pct = 100.5;
        assert!(s.validate_domains().is_err());
        s.threshold_pct = 5.0;
        s.turnout_pct = f64::NAN;
        assert!(s.validate_domains().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn settings_wire_defaults() {
        let s: ElectionSettings = serde_json::from_str(r#"{"system":"fptp","threshold_pct":0}"#).unwrap();
        assert_eq!(s.system, ElectoralSystem::Fptp);
        assert_eq!(s.threshold_pct, 0.0);
        assert_eq!(s.eligible_voters, 10_000_000);
        let v = serde_json::to_value(s).unwrap();
        assert_eq!(v["system"], "First-Past-The-Post");
    }
}
