//! Configuration module - environment variable parsing
//!
//! These are the global defaults every match starts from. Per-arena deltas are
//! applied on top of [`MatchDefaults`] when a session resolves its settings.

use std::env;
use std::str::FromStr;

/// Engine configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Global match setting defaults
    pub defaults: MatchDefaults,
    /// Points and currency handed out by combat
    pub rewards: Rewards,
    /// Timer cadence and protection windows
    pub timing: TimingConfig,
    /// Idle (afk) detection
    pub idle: IdlePolicy,
    /// Random gifts on spawn
    pub gifts: GiftPolicy,
}

/// Global defaults for the per-match settings snapshot.
///
/// `-1` means unlimited for ammo, grenades, airstrikes and respawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchDefaults {
    pub balls: i32,
    pub grenades: i32,
    pub airstrikes: i32,
    pub lives: i32,
    pub respawns: i32,
    /// Round duration in time units
    pub round_time: i32,
}

/// Stat rewards applied by the combat resolver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rewards {
    pub points_per_hit: i64,
    pub points_per_kill: i64,
    /// Usually negative: a penalty for hitting a teammate
    pub points_per_team_attack: i64,
    pub cash_per_hit: i64,
    pub cash_per_kill: i64,
}

/// Timer and window configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// Pre-match countdown length in time units
    pub countdown_start: u32,
    /// Spawn protection length in time units
    pub protection_time: u32,
    /// Host ticks per time unit
    pub ticks_per_unit: u32,
    /// Host tick length in milliseconds
    pub host_tick_millis: u64,
    /// Round clock announces remaining time every N units
    pub round_announce_every: u32,
    /// Countdown announces remaining time every N units
    pub countdown_announce_every: u32,
    /// Every unit at or below this remaining value is announced
    pub announce_final_stretch: u32,
    /// Host ticks a freshly spawned player counts as "just respawned"
    pub just_respawned_ticks: u32,
}

/// Idle detection policy.
///
/// This is a heuristic: a player is considered idle for a life when they died
/// within `radius` of their spawn point without firing or scoring a kill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdlePolicy {
    pub enabled: bool,
    pub radius: f64,
    /// Consecutive idle lives before the player is removed from the match
    pub required_lives: u32,
}

/// Random gift on spawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GiftPolicy {
    pub enabled: bool,
    /// Chance in percent (0-100)
    pub chance_percent: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            defaults: MatchDefaults {
                balls: 100,
                grenades: 0,
                airstrikes: 0,
                lives: 1,
                respawns: 0,
                round_time: 240,
            },
            rewards: Rewards {
                points_per_hit: 1,
                points_per_kill: 2,
                points_per_team_attack: -1,
                cash_per_hit: 0,
                cash_per_kill: 10,
            },
            timing: TimingConfig {
                countdown_start: 10,
                protection_time: 5,
                ticks_per_unit: 20,
                host_tick_millis: 50,
                round_announce_every: 30,
                countdown_announce_every: 5,
                announce_final_stretch: 5,
                just_respawned_ticks: 12,
            },
            idle: IdlePolicy {
                enabled: true,
                radius: 5.0,
                required_lives: 3,
            },
            gifts: GiftPolicy {
                enabled: false,
                chance_percent: 5,
            },
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = Self::default();

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or(base.log_level),
            defaults: MatchDefaults {
                balls: env_or("MATCH_BALLS", base.defaults.balls)?,
                grenades: env_or("MATCH_GRENADES", base.defaults.grenades)?,
                airstrikes: env_or("MATCH_AIRSTRIKES", base.defaults.airstrikes)?,
                lives: env_or("MATCH_LIVES", base.defaults.lives)?,
                respawns: env_or("MATCH_RESPAWNS", base.defaults.respawns)?,
                round_time: env_or("MATCH_ROUND_TIME", base.defaults.round_time)?,
            },
            rewards: Rewards {
                points_per_hit: env_or("POINTS_PER_HIT", base.rewards.points_per_hit)?,
                points_per_kill: env_or("POINTS_PER_KILL", base.rewards.points_per_kill)?,
                points_per_team_attack: env_or(
                    "POINTS_PER_TEAM_ATTACK",
                    base.rewards.points_per_team_attack,
                )?,
                cash_per_hit: env_or("CASH_PER_HIT", base.rewards.cash_per_hit)?,
                cash_per_kill: env_or("CASH_PER_KILL", base.rewards.cash_per_kill)?,
            },
            timing: TimingConfig {
                countdown_start: env_or("COUNTDOWN_START", base.timing.countdown_start)?,
                protection_time: env_or("PROTECTION_TIME", base.timing.protection_time)?,
                ticks_per_unit: env_or("TICKS_PER_UNIT", base.timing.ticks_per_unit)?,
                host_tick_millis: env_or("HOST_TICK_MILLIS", base.timing.host_tick_millis)?,
                round_announce_every: env_or(
                    "ROUND_ANNOUNCE_EVERY",
                    base.timing.round_announce_every,
                )?,
                countdown_announce_every: env_or(
                    "COUNTDOWN_ANNOUNCE_EVERY",
                    base.timing.countdown_announce_every,
                )?,
                announce_final_stretch: env_or(
                    "ANNOUNCE_FINAL_STRETCH",
                    base.timing.announce_final_stretch,
                )?,
                just_respawned_ticks: env_or(
                    "JUST_RESPAWNED_TICKS",
                    base.timing.just_respawned_ticks,
                )?,
            },
            idle: IdlePolicy {
                enabled: env_or("IDLE_DETECTION", base.idle.enabled)?,
                radius: env_or("IDLE_RADIUS", base.idle.radius)?,
                required_lives: env_or("IDLE_MATCH_AMOUNT", base.idle.required_lives)?,
            },
            gifts: GiftPolicy {
                enabled: env_or("GIFTS_ENABLED", base.gifts.enabled)?,
                chance_percent: env_or("GIFT_ON_SPAWN_CHANCE", base.gifts.chance_percent)?,
            },
        })
    }
}

/// Settings of the `arena-sim` bot harness
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Concurrent matches
    pub matches: usize,
    /// Bots requested per team; a few more join unassigned
    pub players_per_team: usize,
    /// Base seed; match `n` uses `seed + n`
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            matches: 4,
            players_per_team: 4,
            seed: 2024,
        }
    }
}

impl SimConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = Self::default();
        Ok(Self {
            matches: env_or("SIM_MATCHES", base.matches)?,
            players_per_team: env_or("SIM_PLAYERS_PER_TEAM", base.players_per_team)?,
            seed: env_or("SIM_SEED", base.seed)?,
        })
    }
}

/// Read `key` from the environment, falling back to `default` when unset
fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
