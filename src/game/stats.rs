//! Per-match player statistics

use serde::{Deserialize, Serialize};

/// Kinds of per-match statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Shots,
    Hits,
    Kills,
    Deaths,
    TeamAttacks,
    Grenades,
    Airstrikes,
    Points,
    Money,
}

/// Aggregated stats for one player in one match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchStats {
    pub shots: i64,
    pub hits: i64,
    pub kills: i64,
    pub deaths: i64,
    pub team_attacks: i64,
    pub grenades: i64,
    pub airstrikes: i64,
    pub points: i64,
    pub money: i64,
    /// hits / shots
    pub hit_ratio: f64,
    /// kills / deaths (kills when deathless)
    pub kd_ratio: f64,
}

impl PlayerMatchStats {
    pub fn add(&mut self, kind: StatKind, delta: i64) {
        let slot = match kind {
            StatKind::Shots => &mut self.shots,
            StatKind::Hits => &mut self.hits,
            StatKind::Kills => &mut self.kills,
            StatKind::Deaths => &mut self.deaths,
            StatKind::TeamAttacks => &mut self.team_attacks,
            StatKind::Grenades => &mut self.grenades,
            StatKind::Airstrikes => &mut self.airstrikes,
            StatKind::Points => &mut self.points,
            StatKind::Money => &mut self.money,
        };
        *slot += delta;
    }

    pub fn recompute_ratios(&mut self) {
        self.hit_ratio = if self.shots > 0 {
            self.hits as f64 / self.shots as f64
        } else {
            0.0
        };
        self.kd_ratio = if self.deaths > 0 {
            self.kills as f64 / self.deaths as f64
        } else {
            self.kills as f64
        };
    }

    /// Offensive activity counted by the idle heuristic
    pub fn offense(&self) -> (i64, i64) {
        (self.shots, self.kills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_ratios() {
        let mut stats = PlayerMatchStats::default();
        stats.add(StatKind::Shots, 4);
        stats.add(StatKind::Hits, 1);
        stats.add(StatKind::Kills, 3);
        stats.recompute_ratios();
        assert_eq!(stats.hit_ratio, 0.25);
        assert_eq!(stats.kd_ratio, 3.0);

        stats.add(StatKind::Deaths, 2);
        stats.recompute_ratios();
        assert_eq!(stats.kd_ratio, 1.5);
    }

    #[test]
    fn test_negative_points() {
        let mut stats = PlayerMatchStats::default();
        stats.add(StatKind::Points, -2);
        assert_eq!(stats.points, -2);
    }
}
