//! Per-match settings snapshot
//!
//! Resolved once at session construction from the global [`MatchDefaults`]
//! plus an arena-specific delta, then never changed.

use serde::{Deserialize, Serialize};

use crate::config::MatchDefaults;

/// Sentinel for "no limit" on ammo, grenades, airstrikes and respawns
pub const UNLIMITED: i32 = -1;

/// Minimum round duration in time units
pub const MIN_ROUND_TIME: i32 = 30;

/// Minimum starting lives
pub const MIN_LIVES: i32 = 1;

/// Arena-specific adjustments added to the global defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaDelta {
    pub balls: i32,
    pub grenades: i32,
    pub airstrikes: i32,
    pub lives: i32,
    pub respawns: i32,
    pub round_time: i32,
}

/// Resolved settings for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettings {
    pub balls: i32,
    pub grenades: i32,
    pub airstrikes: i32,
    pub lives: i32,
    pub respawns: i32,
    pub round_time: i32,
}

impl MatchSettings {
    /// Combine defaults with an arena delta and clamp every value to its floor
    pub fn resolve(defaults: &MatchDefaults, delta: &ArenaDelta) -> Self {
        Self {
            balls: clamp_limit(defaults.balls.saturating_add(delta.balls)),
            grenades: clamp_limit(defaults.grenades.saturating_add(delta.grenades)),
            airstrikes: clamp_limit(defaults.airstrikes.saturating_add(delta.airstrikes)),
            lives: defaults.lives.saturating_add(delta.lives).max(MIN_LIVES),
            respawns: clamp_limit(defaults.respawns.saturating_add(delta.respawns)),
            round_time: defaults
                .round_time
                .saturating_add(delta.round_time)
                .max(MIN_ROUND_TIME),
        }
    }

    pub fn unlimited_respawns(&self) -> bool {
        self.respawns == UNLIMITED
    }

    /// Round duration as a timer length
    pub fn round_units(&self) -> u32 {
        self.round_time.max(MIN_ROUND_TIME) as u32
    }
}

fn clamp_limit(value: i32) -> i32 {
    value.max(UNLIMITED)
}
