//! Per-player life counters and survivor accounting

use std::collections::HashMap;

use super::roster::Roster;
use super::settings::UNLIMITED;
use super::types::{PlayerId, Side};

/// Lives, respawn budgets and spawn protection for every combatant.
///
/// `lives == 0` is the only "currently eliminated" signal. A respawn budget of
/// [`UNLIMITED`] never runs out. Protection entries are removed when they run
/// out, never left at zero.
#[derive(Debug, Clone, Default)]
pub struct SurvivalTracker {
    lives: HashMap<PlayerId, i32>,
    respawns: HashMap<PlayerId, i32>,
    protection: HashMap<PlayerId, u32>,
}

impl SurvivalTracker {
    /// Counters for every combatant, created once per match
    pub fn new(combatants: impl IntoIterator<Item = PlayerId>, lives: i32, respawns: i32) -> Self {
        let mut tracker = Self::default();
        for player in combatants {
            tracker.lives.insert(player, lives);
            tracker.respawns.insert(player, respawns);
        }
        tracker
    }

    pub fn lives(&self, player: PlayerId) -> Option<i32> {
        self.lives.get(&player).copied()
    }

    pub fn respawns(&self, player: PlayerId) -> Option<i32> {
        self.respawns.get(&player).copied()
    }

    /// Spectators always survive; combatants survive while they have lives or
    /// respawn budget left.
    pub fn is_survivor(&self, roster: &Roster, player: PlayerId) -> bool {
        if roster.is_spectator(player) {
            return true;
        }
        if roster.side_of(player).is_none() {
            return false;
        }
        self.respawns(player).unwrap_or(0) != 0 || self.lives(player).unwrap_or(0) > 0
    }

    pub fn survivors(&self, roster: &Roster, side: Side) -> usize {
        roster
            .team(side)
            .iter()
            .filter(|p| self.is_survivor(roster, **p))
            .count()
    }

    /// Strictly more survivors wins; equal counts are a draw
    pub fn winning_side(&self, roster: &Roster) -> Option<Side> {
        let red = self.survivors(roster, Side::Red);
        let blue = self.survivors(roster, Side::Blue);
        if red > blue {
            Some(Side::Red)
        } else if blue > red {
            Some(Side::Blue)
        } else {
            None
        }
    }

    /// Take one life, returning what is left
    pub fn lose_life(&mut self, player: PlayerId) -> Option<i32> {
        let lives = self.lives.get_mut(&player)?;
        debug_assert!(*lives > 0, "life lost by already eliminated player {player}");
        *lives -= 1;
        Some(*lives)
    }

    /// End the current life
    pub fn eliminate(&mut self, player: PlayerId) {
        if let Some(lives) = self.lives.get_mut(&player) {
            *lives = 0;
        }
        self.protection.remove(&player);
    }

    /// Start a new life with full lives, spending one respawn unless unlimited
    pub fn restore(&mut self, player: PlayerId, full_lives: i32) {
        if let Some(lives) = self.lives.get_mut(&player) {
            *lives = full_lives;
        }
        if let Some(budget) = self.respawns.get_mut(&player) {
            debug_assert!(*budget != 0, "respawn without budget for {player}");
            if *budget != UNLIMITED {
                *budget -= 1;
            }
        }
        self.protection.remove(&player);
    }

    /// Zero out lives and respawn budget
    pub fn forfeit(&mut self, player: PlayerId) {
        self.eliminate(player);
        if let Some(budget) = self.respawns.get_mut(&player) {
            *budget = 0;
        }
    }

    pub fn clear_respawns(&mut self, player: PlayerId) {
        if let Some(budget) = self.respawns.get_mut(&player) {
            *budget = 0;
        }
    }

    pub fn protect(&mut self, player: PlayerId, units: u32) {
        if units > 0 {
            self.protection.insert(player, units);
        }
    }

    pub fn is_protected(&self, player: PlayerId) -> bool {
        self.protection.contains_key(&player)
    }

    /// Count every protection window down by one unit; returns the players
    /// whose protection just ran out.
    pub fn decay_protection(&mut self) -> Vec<PlayerId> {
        let mut expired = Vec::new();
        self.protection.retain(|player, units| {
            *units = units.saturating_sub(1);
            if *units == 0 {
                expired.push(*player);
                false
            } else {
                true
            }
        });
        expired.sort();
        expired
    }
}
