//! Match outcome and the final report handed off at game end

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::roster::Roster;
use super::stats::PlayerMatchStats;
use super::types::{Location, PlayerId, Side};

/// Winners and losers; both empty on a draw
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winners: Vec<PlayerId>,
    pub losers: Vec<PlayerId>,
    pub winning_side: Option<Side>,
    pub losing_side: Option<Side>,
}

impl MatchOutcome {
    pub fn draw() -> Self {
        Self::default()
    }

    pub fn decided(roster: &Roster, winner: Side) -> Self {
        Self {
            winners: roster.team(winner).to_vec(),
            losers: roster.team(winner.opponent()).to_vec(),
            winning_side: Some(winner),
            losing_side: Some(winner.opponent()),
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winning_side.is_none()
    }

    /// Team name of the winners, empty on a draw
    pub fn win_label(&self) -> &'static str {
        self.winning_side.map(Side::label).unwrap_or("")
    }

    /// Team name of the losers, empty on a draw
    pub fn lose_label(&self) -> &'static str {
        self.losing_side.map(Side::label).unwrap_or("")
    }
}

/// One player's line in the final report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerReport {
    pub player: PlayerId,
    pub side: Option<Side>,
    pub stats: PlayerMatchStats,
    /// Last known location, frozen at game end
    pub last_location: Option<Location>,
}

/// Final state of a finished match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_id: Uuid,
    pub arena: String,
    pub draw: bool,
    pub outcome: MatchOutcome,
    pub roster: Roster,
    /// Sorted by points, best first
    pub players: Vec<PlayerReport>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl MatchReport {
    pub fn build(
        match_id: Uuid,
        arena: &str,
        outcome: MatchOutcome,
        roster: &Roster,
        stats: &HashMap<PlayerId, PlayerMatchStats>,
        last_locations: &HashMap<PlayerId, Location>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let mut players: Vec<PlayerReport> = stats
            .iter()
            .map(|(player, stats)| PlayerReport {
                player: *player,
                side: roster.side_of(*player),
                stats: stats.clone(),
                last_location: last_locations.get(player).cloned(),
            })
            .collect();

        players.sort_by(|a, b| {
            b.stats
                .points
                .cmp(&a.stats.points)
                .then_with(|| a.player.cmp(&b.player))
        });

        Self {
            match_id,
            arena: arena.to_string(),
            draw: outcome.is_draw(),
            outcome,
            roster: roster.clone(),
            players,
            started_at,
            ended_at: Utc::now(),
        }
    }

    pub fn player(&self, player: PlayerId) -> Option<&PlayerReport> {
        self.players.iter().find(|p| p.player == player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::roster::{RosterManager, TeamRequest};
    use crate::game::stats::StatKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_decided_outcome_and_report_order() {
        let red = PlayerId::new();
        let blue = PlayerId::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let roster = RosterManager::balance(
            TeamRequest {
                red: vec![red],
                blue: vec![blue],
                ..TeamRequest::default()
            },
            &mut rng,
        );

        let outcome = MatchOutcome::decided(&roster, Side::Blue);
        assert_eq!(outcome.winners, vec![blue]);
        assert_eq!(outcome.losers, vec![red]);
        assert_eq!(outcome.win_label(), "blue");
        assert_eq!(outcome.lose_label(), "red");
        assert!(!outcome.is_draw());

        let mut stats = HashMap::new();
        let mut best = PlayerMatchStats::default();
        best.add(StatKind::Points, 5);
        stats.insert(blue, best);
        stats.insert(red, PlayerMatchStats::default());

        let report = MatchReport::build(
            Uuid::new_v4(),
            "dock",
            outcome,
            &roster,
            &stats,
            &HashMap::new(),
            Utc::now(),
        );
        assert!(!report.draw);
        assert_eq!(report.players[0].player, blue);
        assert_eq!(report.player(red).and_then(|p| p.side), Some(Side::Red));
        assert!(serde_json::to_string(&report).is_ok());
    }

    #[test]
    fn test_draw_outcome_is_empty() {
        let outcome = MatchOutcome::draw();
        assert!(outcome.is_draw());
        assert!(outcome.winners.is_empty());
        assert!(outcome.losers.is_empty());
        assert_eq!(outcome.win_label(), "");
    }
}
