//! Team membership and balanced team assignment

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::{PlayerId, Side};

/// Players handed to a new match, before balancing
#[derive(Debug, Clone, Default)]
pub struct TeamRequest {
    pub red: Vec<PlayerId>,
    pub blue: Vec<PlayerId>,
    pub spectators: Vec<PlayerId>,
    /// Players without a preference; spread over both teams
    pub unassigned: Vec<PlayerId>,
}

/// Final team membership of a match.
///
/// A player is in at most one of red, blue and spectators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    red: Vec<PlayerId>,
    blue: Vec<PlayerId>,
    spectators: Vec<PlayerId>,
}

impl Roster {
    pub fn team(&self, side: Side) -> &[PlayerId] {
        match side {
            Side::Red => &self.red,
            Side::Blue => &self.blue,
        }
    }

    pub fn spectators(&self) -> &[PlayerId] {
        &self.spectators
    }

    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if self.red.contains(&player) {
            Some(Side::Red)
        } else if self.blue.contains(&player) {
            Some(Side::Blue)
        } else {
            None
        }
    }

    pub fn is_spectator(&self, player: PlayerId) -> bool {
        self.spectators.contains(&player)
    }

    /// Member of either team or a spectator
    pub fn contains(&self, player: PlayerId) -> bool {
        self.side_of(player).is_some() || self.is_spectator(player)
    }

    /// Both teams, red first
    pub fn combatants(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.red.iter().chain(self.blue.iter()).copied()
    }

    /// Combatants followed by spectators
    pub fn everyone(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.combatants().chain(self.spectators.iter().copied())
    }

    pub fn are_enemies(&self, a: PlayerId, b: PlayerId) -> bool {
        matches!(
            (self.side_of(a), self.side_of(b)),
            (Some(x), Some(y)) if x != y
        )
    }

    pub fn are_teammates(&self, a: PlayerId, b: PlayerId) -> bool {
        matches!(
            (self.side_of(a), self.side_of(b)),
            (Some(x), Some(y)) if x == y
        )
    }

    /// Remove a player from their team, returning the side they were on
    pub fn remove_from_team(&mut self, player: PlayerId) -> Option<Side> {
        let side = self.side_of(player)?;
        match side {
            Side::Red => self.red.retain(|p| *p != player),
            Side::Blue => self.blue.retain(|p| *p != player),
        }
        Some(side)
    }

    pub fn remove_spectator(&mut self, player: PlayerId) -> bool {
        let before = self.spectators.len();
        self.spectators.retain(|p| *p != player);
        self.spectators.len() != before
    }

    /// True when no player appears twice across the three groups
    pub fn is_disjoint(&self) -> bool {
        let mut seen = HashSet::new();
        self.everyone().all(|p| seen.insert(p))
    }
}

/// Builds balanced teams from a [`TeamRequest`]
pub struct RosterManager;

impl RosterManager {
    /// Keep preassigned players where they are and spread the unassigned ones.
    ///
    /// Unassigned players are shuffled, then each goes to the smaller team,
    /// red on ties. Preassigned counts are included from the start, so the
    /// result is greedy-balanced, not optimal.
    pub fn balance<R: Rng>(request: TeamRequest, rng: &mut R) -> Roster {
        let mut roster = Roster::default();
        let mut seen = HashSet::new();

        let mut admit = |player: PlayerId, group: &mut Vec<PlayerId>| {
            let fresh = seen.insert(player);
            debug_assert!(fresh, "player {player} assigned to more than one group");
            if fresh {
                group.push(player);
            }
        };

        for player in request.red {
            admit(player, &mut roster.red);
        }
        for player in request.blue {
            admit(player, &mut roster.blue);
        }
        for player in request.spectators {
            admit(player, &mut roster.spectators);
        }

        let mut pool = request.unassigned;
        pool.shuffle(rng);
        for player in pool {
            if roster.blue.len() < roster.red.len() {
                admit(player, &mut roster.blue);
            } else {
                admit(player, &mut roster.red);
            }
        }

        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn players(n: usize) -> Vec<PlayerId> {
        (0..n).map(|_| PlayerId::new()).collect()
    }

    #[test]
    fn test_balance_fills_smaller_team_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let request = TeamRequest {
            red: players(2),
            blue: Vec::new(),
            spectators: players(1),
            unassigned: players(3),
        };
        let roster = RosterManager::balance(request, &mut rng);

        assert_eq!(roster.team(Side::Red).len(), 3);
        assert_eq!(roster.team(Side::Blue).len(), 2);
        assert_eq!(roster.spectators().len(), 1);
        assert!(roster.is_disjoint());
    }

    #[test]
    fn test_ties_go_to_red() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let request = TeamRequest {
            unassigned: players(1),
            ..TeamRequest::default()
        };
        let roster = RosterManager::balance(request, &mut rng);
        assert_eq!(roster.team(Side::Red).len(), 1);
        assert!(roster.team(Side::Blue).is_empty());
    }

    #[test]
    fn test_empty_request_gives_empty_teams() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let roster = RosterManager::balance(TeamRequest::default(), &mut rng);
        assert!(roster.team(Side::Red).is_empty());
        assert!(roster.team(Side::Blue).is_empty());
        assert_eq!(roster.everyone().count(), 0);
    }

    #[test]
    fn test_relations() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let red = players(2);
        let blue = players(1);
        let spec = players(1);
        let roster = RosterManager::balance(
            TeamRequest {
                red: red.clone(),
                blue: blue.clone(),
                spectators: spec.clone(),
                unassigned: Vec::new(),
            },
            &mut rng,
        );

        assert!(roster.are_enemies(red[0], blue[0]));
        assert!(roster.are_enemies(blue[0], red[1]));
        assert!(roster.are_teammates(red[0], red[1]));
        assert!(!roster.are_enemies(red[0], spec[0]));
        assert!(!roster.are_teammates(spec[0], spec[0]));
        assert_eq!(roster.side_of(spec[0]), None);
        assert!(roster.contains(spec[0]));
    }

    #[test]
    fn test_remove_from_team_and_spectators() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let red = players(2);
        let spec = players(1);
        let mut roster = RosterManager::balance(
            TeamRequest {
                red: red.clone(),
                spectators: spec.clone(),
                ..TeamRequest::default()
            },
            &mut rng,
        );

        assert_eq!(roster.remove_from_team(red[0]), Some(Side::Red));
        assert_eq!(roster.remove_from_team(red[0]), None);
        assert_eq!(roster.team(Side::Red), &[red[1]]);

        assert!(roster.remove_spectator(spec[0]));
        assert!(!roster.remove_spectator(spec[0]));
    }

    proptest! {
        #[test]
        fn prop_balanced_when_pool_covers_gap(a in 0usize..6, gap in 0usize..6, extra in 0usize..12, seed in any::<u64>()) {
            // pool large enough to close the initial gap
            let b = a + gap;
            let n = gap + extra;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let roster = RosterManager::balance(
                TeamRequest {
                    red: players(a),
                    blue: players(b),
                    spectators: Vec::new(),
                    unassigned: players(n),
                },
                &mut rng,
            );
            let red = roster.team(Side::Red).len() as i64;
            let blue = roster.team(Side::Blue).len() as i64;
            prop_assert!((red - blue).abs() <= 1);
            prop_assert_eq!((red + blue) as usize, a + b + n);
            prop_assert!(roster.is_disjoint());
        }
    }
}
