//! Coalition arithmetic over an immutable legislature snapshot.

use pm_core::{Party, PartyId};

/// Borrowed view of the legislature state that predicates and majority math read.
#[derive(Debug, Clone, Copy)]
pub struct StateSnapshot<'a> {
    pub parties: &'a [Party],
    pub coalition: &'a [PartyId],
    pub total_seats: u32,
}

impl<'a> StateSnapshot<'a> {
    pub fn new(parties: &'a [Party], coalition: &'a [PartyId], total_seats: u32) -> Self {
        Self { parties, coalition, total_seats }
    }

    /// Seats held by coalition members. Ids with no matching party count 0.
    pub fn coalition_seats(&self) -> u32 {
        self.parties
            .iter()
            .filter(|p| self.coalition.contains(&p.id))
            .fold(0u32, |acc, p| acc.saturating_add(p.seats))
    }

    /// Seats held by all parties (may differ from `total_seats` before an election).
    pub fn seated_total(&self) -> u32 {
        self.parties.iter().fold(0u32, |acc, p| acc.saturating_add(p.seats))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorityKind {
    Simple,
    TwoThirds,
    ThreeQuarters,
}

impl MajorityKind {
    pub const ALL: [MajorityKind; 3] = [MajorityKind::Simple, MajorityKind::TwoThirds, MajorityKind::ThreeQuarters];

    pub fn label(self) -> &'static str {
        match self {
            MajorityKind::Simple => "Simple Majority",
            MajorityKind::TwoThirds => "Two-Thirds Majority",
            MajorityKind::ThreeQuarters => "Three-Quarters Majority",
        }
    }

    /// Seats needed out of `total_seats`.
    pub fn target(self, total_seats: u32) -> u32 {
        let s = total_seats as u64;
        let t = match self {
            MajorityKind::Simple => s / 2 + 1,
            MajorityKind::TwoThirds => (2 * s).div_ceil(3),
            MajorityKind::ThreeQuarters => (3 * s).div_ceil(4),
        };
        t as u32
    }
}

/// One row of the majority tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MajorityTarget {
    pub kind: MajorityKind,
    pub target: u32,
    pub achieved: bool,
    /// min(seats / target * 100, 100); 0 when target is 0.
    pub progress_pct: f64,
}

/// Strictly more than half: floor(S/2) + 1.
#[inline]
pub fn majority_required(total_seats: u32) -> u32 {
    MajorityKind::Simple.target(total_seats)
}

/// Simple, two-thirds and three-quarters targets for `coalition_seats`.
pub fn majority_targets(total_seats: u32, coalition_seats: u32) -> [MajorityTarget; 3] {
    MajorityKind::ALL.map(|kind| {
        let target = kind.target(total_seats);
        let progress_pct = if target == 0 {
            0.0
        } else {
            (coalition_seats as f64 / target as f64 * 100.0).min(100.0)
        };
        MajorityTarget { kind, target, achieved: coalition_seats >= target, progress_pct }
    })
}
