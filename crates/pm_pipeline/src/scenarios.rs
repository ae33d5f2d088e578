//! Coalition challenges as named predicates over an immutable snapshot.

use pm_algo::StateSnapshot;

/// A challenge the user can complete by forming a coalition.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub is_completed: fn(&StateSnapshot<'_>) -> bool,
}

impl core::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scenario").field("id", &self.id).field("title", &self.title).finish()
    }
}

fn simple_majority(s: &StateSnapshot<'_>) -> bool {
    s.coalition_seats() as u64 * 2 > s.total_seats as u64
}

fn two_thirds_majority(s: &StateSnapshot<'_>) -> bool {
    s.coalition_seats() as u64 * 3 >= s.total_seats as u64 * 2
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        id: "s1",
        title: "Simple Majority",
        description: "Form a coalition with more than 50% of the seats.",
        is_completed: simple_majority,
    },
    Scenario {
        id: "s2",
        title: "Two-Thirds Majority",
        description: "Form a super-majority coalition with over 2/3 of the seats. This is often needed for constitutional changes.",
        is_completed: two_thirds_majority,
    },
];

pub fn scenario(id: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.id == id)
}

/// Ids of every scenario the snapshot satisfies, in declaration order.
pub fn satisfied(snapshot: &StateSnapshot<'_>) -> Vec<&'static str> {
    SCENARIOS
        .iter()
        .filter(|s| (s.is_completed)(snapshot))
        .map(|s| s.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_core::{Ideology, Party, PartyId};

    fn chamber(seats: &[u32]) -> Vec<Party> {
        seats
            .iter()
            .enumerate()
            .map(|(i, &s)| Party::new(PartyId::numbered(i as u64 + 1), "x", "hsl(0, 0%, 0%)", Ideology::Center).with_seats(s))
            .collect()
    }

    #[test]
    fn exactly_half_is_not_a_majority() {
        let ps = chamber(&[50, 50]);
        let coalition = vec![PartyId::numbered(1)];
        let snap = StateSnapshot::new(&ps, &coalition, 100);
        assert!(satisfied(&snap).is_empty());
    }

    #[test]
    fn two_thirds_boundary_is_inclusive() {
        let ps = chamber(&[100, 50]);
        let coalition = vec![PartyId::numbered(1)];
        let snap = StateSnapshot::new(&ps, &coalition, 150);
        assert_eq!(satisfied(&snap), vec!["s1", "s2"]);
        let ps = chamber(&[99, 51]);
        let snap = StateSnapshot::new(&ps, &coalition, 150);
        assert_eq!(satisfied(&snap), vec!["s1"]);
    }

    #[test]
    fn lookup() {
        assert_eq!(scenario("s2").map(|s| s.title), Some("Two-Thirds Majority"));
        assert!(scenario("s9").is_none());
    }
}
