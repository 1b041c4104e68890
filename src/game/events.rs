//! Events emitted by a match for its collaborators
//!
//! The engine never renders text, plays sounds, moves players or tears down
//! gadgets itself. It queues these events and the host fans them out; whoever
//! owns a concern subscribes and reacts. Delivery is best effort.

use serde::{Deserialize, Serialize};

use super::report::MatchReport;
use super::settings::MatchSettings;
use super::types::{HitCause, Location, PlayerId, Side, TeamRole};

/// Everything a match tells the outside world
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    /// Final teams after balancing (name colouring, tags)
    TeamsAssigned {
        red: Vec<PlayerId>,
        blue: Vec<PlayerId>,
        spectators: Vec<PlayerId>,
    },

    /// A message for one player; the renderer owns the wording
    Notice { to: PlayerId, notice: Notice },

    /// Sound or visual effect for the listed players
    Effect { effect: Effect, players: Vec<PlayerId> },

    /// Line for the match feed
    Feed { line: FeedLine },

    /// Move a player
    Teleport { player: PlayerId, location: Location },

    /// Dress a player for a role and grant the match loadout
    Equip {
        player: PlayerId,
        role: TeamRole,
        settings: MatchSettings,
    },

    /// Spawn gift roll succeeded
    Gift { player: PlayerId },

    /// Every participant should see every other participant
    AllVisible { players: Vec<PlayerId> },

    /// Countdown finished, combat is on
    MatchLive,

    /// Remaining round time, every unit
    RoundClock { remaining: u32 },

    /// A life ended
    PlayerEliminated {
        player: PlayerId,
        killer: Option<PlayerId>,
        cause: Option<HitCause>,
    },

    /// A new life started
    PlayerRespawned { player: PlayerId, respawns_left: i32 },

    /// Out of lives and respawns; route to spectating / lobby
    PlayerOut { player: PlayerId },

    /// Removed for repeated idleness; route to lobby
    IdleKicked { player: PlayerId },

    /// Tear down everything this player owns (turrets, mines, zoom)
    PlayerRemoved { player: PlayerId },

    /// Tear down match-wide transient state (strikes, grenades, colours)
    MatchEnding,

    /// Final state hand-off, emitted exactly once
    MatchEnded { report: Box<MatchReport> },
}

/// Player-facing message kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    BeInTeam { side: Side },
    BeSpectator,
    Protection { units: u32 },
    ProtectionOver,
    Countdown { remaining: u32 },
    /// `respawns` is `None` when unlimited
    Respawn { lives: i32, respawns: Option<i32> },
    YouHitProtected { target: PlayerId },
    YouWereHitProtected { shooter: PlayerId },
    YouHit {
        target: PlayerId,
        hits_taken: i32,
        lives_left: i32,
        max_lives: i32,
    },
    YouWereHit {
        shooter: PlayerId,
        hits_taken: i32,
        lives_left: i32,
        max_lives: i32,
    },
    /// `points` is set when team attacks are worth anything
    YouHitMate { target: PlayerId, points: Option<i64> },
    HitByMate { shooter: PlayerId },
    YouKilled {
        target: PlayerId,
        points: i64,
        money: i64,
    },
    YouWereKilled { killer: PlayerId },
    YouDied,
    YouLeftTeam,
}

/// Effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    EquipLoadout,
    Protected,
    Hit,
    TeamAttack,
    Frag,
}

/// Match feed lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedLine {
    SettingsInfo {
        lives: i32,
        respawns: Option<i32>,
        round_time: i32,
    },
    MatchStart,
    RoundTime { remaining: u32 },
    Kill {
        killer: PlayerId,
        target: PlayerId,
        cause: HitCause,
    },
    Death { target: PlayerId },
    IdleLeave { player: PlayerId },
}

impl MatchEvent {
    /// Notice addressed to `player`, if this is one
    pub fn notice_for(&self, player: PlayerId) -> Option<&Notice> {
        match self {
            MatchEvent::Notice { to, notice } if *to == player => Some(notice),
            _ => None,
        }
    }
}
