//! Match engine modules

pub mod combat;
pub mod events;
pub mod idle;
pub mod report;
pub mod roster;
pub mod session;
pub mod settings;
pub mod spawn;
pub mod stats;
pub mod survival;
pub mod timer;
pub mod types;
pub mod world;

pub use combat::HitOutcome;
pub use events::{Effect, FeedLine, MatchEvent, Notice};
pub use idle::{IdleLedger, SharedIdleLedger};
pub use report::{MatchOutcome, MatchReport, PlayerReport};
pub use roster::{Roster, RosterManager, TeamRequest};
pub use session::{ArenaLayout, MatchPhase, MatchSession, SessionContext, SessionError};
pub use settings::{ArenaDelta, MatchSettings, UNLIMITED};
pub use spawn::{SpawnPool, SpawnRotator};
pub use stats::{PlayerMatchStats, StatKind};
pub use survival::SurvivalTracker;
pub use timer::{TimerHandlers, TimerService, TimerSpec, TimerState};
pub use types::{HitCause, Location, PlayerId, Side, TeamRole};
pub use world::{PositionBoard, PositionSource};

/// Fixed-seed sessions for unit tests
#[cfg(test)]
pub(crate) mod testkit {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::*;
    use crate::config::EngineConfig;

    pub const COUNTDOWN: u32 = 3;

    /// Short match: 3 lives, unlimited respawns, 60 unit round, one tick per unit
    pub fn config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.defaults.lives = 3;
        config.defaults.respawns = UNLIMITED;
        config.defaults.round_time = 60;
        config.timing.countdown_start = COUNTDOWN;
        config.timing.ticks_per_unit = 1;
        config.timing.protection_time = 0;
        config.timing.just_respawned_ticks = 3;
        config.idle.enabled = true;
        config.idle.radius = 5.0;
        config.idle.required_lives = 3;
        config.gifts.enabled = false;
        config
    }

    pub fn arena() -> ArenaLayout {
        ArenaLayout {
            name: "dock".to_string(),
            red_spawns: vec![
                Location::new("arena", 0.0, 64.0, 0.0),
                Location::new("arena", 0.0, 64.0, 10.0),
            ],
            blue_spawns: vec![
                Location::new("arena", 100.0, 64.0, 0.0),
                Location::new("arena", 100.0, 64.0, 10.0),
            ],
            spectator_spawns: vec![Location::new("arena", 50.0, 90.0, 5.0)],
            delta: ArenaDelta::default(),
        }
    }

    pub fn context(config: EngineConfig) -> SessionContext {
        SessionContext {
            config: Arc::new(config),
            positions: Arc::new(PositionBoard::new()),
            idle: Arc::new(SharedIdleLedger::new()),
        }
    }

    pub struct Fixture {
        pub session: MatchSession,
        pub positions: Arc<PositionBoard>,
        pub idle: Arc<SharedIdleLedger>,
    }

    impl Fixture {
        pub fn new(red: usize, blue: usize, spectators: usize) -> Self {
            Self::build(red, blue, spectators, 7, |_| {})
        }

        pub fn seeded(red: usize, blue: usize, spectators: usize, seed: u64) -> Self {
            Self::build(red, blue, spectators, seed, |_| {})
        }

        pub fn with_settings(
            red: usize,
            blue: usize,
            spectators: usize,
            tweak: impl FnOnce(&mut EngineConfig),
        ) -> Self {
            Self::build(red, blue, spectators, 7, tweak)
        }

        fn build(
            red: usize,
            blue: usize,
            spectators: usize,
            seed: u64,
            tweak: impl FnOnce(&mut EngineConfig),
        ) -> Self {
            let mut config = config();
            tweak(&mut config);

            let positions = Arc::new(PositionBoard::new());
            let idle = Arc::new(SharedIdleLedger::new());
            let ctx = SessionContext {
                config: Arc::new(config),
                positions: positions.clone(),
                idle: idle.clone(),
            };
            let teams = TeamRequest {
                red: (0..red).map(|_| PlayerId::new()).collect(),
                blue: (0..blue).map(|_| PlayerId::new()).collect(),
                spectators: (0..spectators).map(|_| PlayerId::new()).collect(),
                unassigned: Vec::new(),
            };

            let session = MatchSession::new(Uuid::new_v4(), arena(), teams, ctx, seed)
                .expect("test arena is valid");
            Self {
                session,
                positions,
                idle,
            }
        }

        pub fn red(&self, index: usize) -> PlayerId {
            self.session.team(Side::Red)[index]
        }

        pub fn blue(&self, index: usize) -> PlayerId {
            self.session.team(Side::Blue)[index]
        }

        pub fn spectator(&self, index: usize) -> PlayerId {
            self.session.roster().spectators()[index]
        }

        pub fn ticks(&mut self, n: u32) {
            for _ in 0..n {
                self.session.tick();
            }
        }

        /// Run the countdown out
        pub fn go_live(&mut self) {
            self.ticks(COUNTDOWN);
            assert_eq!(self.session.phase(), MatchPhase::Live);
        }

        /// Report `player` standing exactly on their last spawn point
        pub fn park_at_spawn(&self, player: PlayerId) {
            let spawn = self.session.spawn_points[&player].clone();
            self.positions.set(player, spawn);
        }
    }
}
