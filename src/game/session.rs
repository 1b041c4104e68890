//! Match session - the authoritative state of one running match
//!
//! A session is created with finalized rosters, counts down, goes live, and
//! ends exactly once (round clock or a wiped-out team). Every mutating entry
//! point takes `&mut self`; the host serialises access per session.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;

use super::events::{Effect, FeedLine, MatchEvent, Notice};
use super::idle::IdleLedger;
use super::report::{MatchOutcome, MatchReport};
use super::roster::{Roster, RosterManager, TeamRequest};
use super::settings::{ArenaDelta, MatchSettings};
use super::spawn::{SpawnPool, SpawnRotator};
use super::stats::PlayerMatchStats;
use super::survival::SurvivalTracker;
use super::timer::{TimerHandlers, TimerService, TimerSpec};
use super::types::{Location, PlayerId, Side, TeamRole};
use super::world::PositionSource;

/// Spawn points and setting deltas of one arena
#[derive(Debug, Clone)]
pub struct ArenaLayout {
    pub name: String,
    pub red_spawns: Vec<Location>,
    pub blue_spawns: Vec<Location>,
    pub spectator_spawns: Vec<Location>,
    pub delta: ArenaDelta,
}

/// Shared services a session reads from
#[derive(Clone)]
pub struct SessionContext {
    pub config: Arc<EngineConfig>,
    pub positions: Arc<dyn PositionSource>,
    pub idle: Arc<dyn IdleLedger>,
}

/// Errors that prevent a session from being created
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Arena {arena} has no {pool} spawn points")]
    EmptySpawnPool { arena: String, pool: SpawnPool },

    #[error("Invalid timing value for {field}: {value}")]
    InvalidTiming { field: &'static str, value: u32 },
}

/// Match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Pre-match countdown, players frozen at their spawns
    Countdown,
    /// Round clock running
    Live,
    /// Ended; nothing changes any more
    Over,
}

/// The authoritative match
pub struct MatchSession {
    pub(super) id: Uuid,
    pub(super) arena: String,
    pub(super) ctx: SessionContext,
    pub(super) settings: MatchSettings,
    pub(super) roster: Roster,
    pub(super) survival: SurvivalTracker,
    pub(super) spawns: SpawnRotator,
    pub(super) stats: HashMap<PlayerId, PlayerMatchStats>,
    /// Where each player last spawned
    pub(super) spawn_points: HashMap<PlayerId, Location>,
    /// (shots, kills) when the current life began
    pub(super) life_offense: HashMap<PlayerId, (i64, i64)>,
    /// Host ticks left in the just-respawned window
    pub(super) just_respawned: HashMap<PlayerId, u32>,
    /// Removed from active combat (out of lives, left, or idle-kicked)
    pub(super) out: HashSet<PlayerId>,
    pub(super) start_timer: Option<TimerService<MatchSession>>,
    pub(super) round_timer: Option<TimerService<MatchSession>>,
    pub(super) phase: MatchPhase,
    pub(super) match_over: bool,
    pub(super) outcome: MatchOutcome,
    pub(super) rng: ChaCha8Rng,
    pub(super) events: Vec<MatchEvent>,
    pub(super) created_at: DateTime<Utc>,
}

impl MatchSession {
    /// Create a session: resolve settings, balance teams, set up counters,
    /// spawn everyone and start the countdown.
    pub fn new(
        id: Uuid,
        arena: ArenaLayout,
        teams: TeamRequest,
        ctx: SessionContext,
        seed: u64,
    ) -> Result<Self, SessionError> {
        let timing = ctx.config.timing;
        if timing.ticks_per_unit == 0 {
            warn!(match_id = %id, arena = %arena.name, "ticks_per_unit must be positive");
            return Err(SessionError::InvalidTiming {
                field: "ticks_per_unit",
                value: timing.ticks_per_unit,
            });
        }

        let ArenaLayout {
            name,
            red_spawns,
            blue_spawns,
            spectator_spawns,
            delta,
        } = arena;

        let settings = MatchSettings::resolve(&ctx.config.defaults, &delta);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let spawns = SpawnRotator::new(red_spawns, blue_spawns, spectator_spawns, &mut rng)
            .map_err(|pool| {
                warn!(match_id = %id, arena = %name, pool = %pool, "Arena spawn pool is empty");
                SessionError::EmptySpawnPool {
                    arena: name.clone(),
                    pool,
                }
            })?;

        let roster = RosterManager::balance(teams, &mut rng);
        debug_assert!(roster.is_disjoint());

        let survival = SurvivalTracker::new(roster.combatants(), settings.lives, settings.respawns);
        let stats = roster
            .combatants()
            .map(|p| (p, PlayerMatchStats::default()))
            .collect();

        let mut session = Self {
            id,
            arena: name,
            ctx,
            settings,
            roster,
            survival,
            spawns,
            stats,
            spawn_points: HashMap::new(),
            life_offense: HashMap::new(),
            just_respawned: HashMap::new(),
            out: HashSet::new(),
            start_timer: None,
            round_timer: None,
            phase: MatchPhase::Countdown,
            match_over: false,
            outcome: MatchOutcome::draw(),
            rng,
            events: Vec::new(),
            created_at: Utc::now(),
        };

        session.emit(MatchEvent::TeamsAssigned {
            red: session.roster.team(Side::Red).to_vec(),
            blue: session.roster.team(Side::Blue).to_vec(),
            spectators: session.roster.spectators().to_vec(),
        });

        let combatants: Vec<PlayerId> = session.roster.combatants().collect();
        for player in combatants {
            session.spawn_player(player);
        }
        let spectators = session.roster.spectators().to_vec();
        for player in spectators {
            session.spawn_spectator(player);
        }

        session.start_countdown();

        info!(
            match_id = %session.id,
            arena = %session.arena,
            red = session.roster.team(Side::Red).len(),
            blue = session.roster.team(Side::Blue).len(),
            spectators = session.roster.spectators().len(),
            lives = session.settings.lives,
            respawns = session.settings.respawns,
            round_time = session.settings.round_time,
            "Match session created"
        );

        Ok(session)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn arena(&self) -> &str {
        &self.arena
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.match_over
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn team(&self, side: Side) -> &[PlayerId] {
        self.roster.team(side)
    }

    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        self.roster.side_of(player)
    }

    pub fn is_spectator(&self, player: PlayerId) -> bool {
        self.roster.is_spectator(player)
    }

    pub fn in_match(&self, player: PlayerId) -> bool {
        self.roster.contains(player)
    }

    pub fn are_enemies(&self, a: PlayerId, b: PlayerId) -> bool {
        self.roster.are_enemies(a, b)
    }

    pub fn are_teammates(&self, a: PlayerId, b: PlayerId) -> bool {
        self.roster.are_teammates(a, b)
    }

    pub fn is_survivor(&self, player: PlayerId) -> bool {
        self.survival.is_survivor(&self.roster, player)
    }

    pub fn survivors(&self, side: Side) -> usize {
        self.survival.survivors(&self.roster, side)
    }

    pub fn winning_side(&self) -> Option<Side> {
        self.survival.winning_side(&self.roster)
    }

    pub fn lives_left(&self, player: PlayerId) -> Option<i32> {
        self.survival.lives(player)
    }

    pub fn respawns_left(&self, player: PlayerId) -> Option<i32> {
        self.survival.respawns(player)
    }

    pub fn is_protected(&self, player: PlayerId) -> bool {
        self.survival.is_protected(player)
    }

    pub fn is_just_respawned(&self, player: PlayerId) -> bool {
        self.just_respawned.contains_key(&player)
    }

    /// Removed from active combat
    pub fn is_out(&self, player: PlayerId) -> bool {
        self.out.contains(&player)
    }

    pub fn stats(&self, player: PlayerId) -> Option<&PlayerMatchStats> {
        self.stats.get(&player)
    }

    /// Winners and losers, once the match is over
    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.match_over.then_some(&self.outcome)
    }

    pub fn countdown_remaining(&self) -> Option<u32> {
        self.start_timer
            .as_ref()
            .filter(|t| t.is_running())
            .map(|t| t.remaining())
    }

    pub fn round_remaining(&self) -> Option<u32> {
        self.round_timer
            .as_ref()
            .filter(|t| t.is_running())
            .map(|t| t.remaining())
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Host tick
    // =========================================================================

    /// Advance timers and windows by one host tick
    pub fn tick(&mut self) {
        if self.match_over {
            return;
        }

        // a round clock started by this tick's countdown completion waits a tick
        let round_running = self.round_timer.is_some();
        TimerService::advance(self, Self::start_slot);
        if round_running {
            TimerService::advance(self, Self::round_slot);
        }

        self.just_respawned.retain(|_, ticks| {
            *ticks = ticks.saturating_sub(1);
            *ticks > 0
        });
    }

    /// Stop both timers; safe to call repeatedly and from timer callbacks
    pub fn end_timers(&mut self) {
        let id = self.id;
        for timer in [self.start_timer.as_mut(), self.round_timer.as_mut()]
            .into_iter()
            .flatten()
        {
            if timer.cancel() {
                debug!(match_id = %id, timer = timer.label(), state = ?timer.state(), "Timer stopped");
            }
        }
    }

    fn start_slot(session: &mut Self) -> Option<&mut TimerService<Self>> {
        session.start_timer.as_mut()
    }

    fn round_slot(session: &mut Self) -> Option<&mut TimerService<Self>> {
        session.round_timer.as_mut()
    }

    fn start_countdown(&mut self) {
        let timing = self.ctx.config.timing;
        let spec = TimerSpec {
            duration: timing.countdown_start,
            ticks_per_unit: timing.ticks_per_unit,
            announce_every: timing.countdown_announce_every,
            final_stretch: timing.announce_final_stretch,
        };
        let handlers = TimerHandlers {
            on_tick: Self::countdown_tick,
            on_announce: Self::countdown_announce,
            on_complete: Self::countdown_complete,
        };
        let mut timer = TimerService::new("countdown", spec, handlers);
        timer.start();
        self.start_timer = Some(timer);
        TimerService::announce_now(self, Self::start_slot);
    }

    fn start_round(&mut self) {
        let timing = self.ctx.config.timing;
        let spec = TimerSpec {
            duration: self.settings.round_units(),
            ticks_per_unit: timing.ticks_per_unit,
            announce_every: timing.round_announce_every,
            final_stretch: timing.announce_final_stretch,
        };
        let handlers = TimerHandlers {
            on_tick: Self::round_tick,
            on_announce: Self::round_announce,
            on_complete: Self::round_complete,
        };
        let mut timer = TimerService::new("round", spec, handlers);
        timer.start();
        self.round_timer = Some(timer);
    }

    /// Keep combatants on their spawn block until the countdown ends
    fn countdown_tick(&mut self, _remaining: u32) {
        let active: Vec<PlayerId> = self
            .roster
            .combatants()
            .filter(|p| !self.out.contains(p))
            .collect();
        for player in active {
            let (Some(current), Some(spawn)) = (
                self.ctx.positions.position(player),
                self.spawn_points.get(&player),
            ) else {
                continue;
            };
            if current.world != spawn.world || current.block() != spawn.block() {
                let location = spawn.facing_like(&current);
                self.emit(MatchEvent::Teleport { player, location });
            }
        }
    }

    fn countdown_announce(&mut self, remaining: u32) {
        let everyone: Vec<PlayerId> = self.roster.everyone().collect();
        for to in everyone {
            self.emit(MatchEvent::Notice {
                to,
                notice: Notice::Countdown { remaining },
            });
        }
    }

    fn countdown_complete(&mut self) {
        self.start_timer = None;
        if self.match_over {
            return;
        }

        self.phase = MatchPhase::Live;
        let respawns = (!self.settings.unlimited_respawns()).then_some(self.settings.respawns);
        self.emit(MatchEvent::Feed {
            line: FeedLine::SettingsInfo {
                lives: self.settings.lives,
                respawns,
                round_time: self.settings.round_time,
            },
        });
        self.emit(MatchEvent::Feed {
            line: FeedLine::MatchStart,
        });
        let visible = self
            .roster
            .everyone()
            .filter(|p| !self.out.contains(p))
            .collect();
        self.emit(MatchEvent::AllVisible { players: visible });
        self.emit(MatchEvent::MatchLive);
        self.start_round();

        info!(match_id = %self.id, arena = %self.arena, "Match is live");
    }

    fn round_tick(&mut self, remaining: u32) {
        for player in self.survival.decay_protection() {
            if self.is_survivor(player) {
                self.emit(MatchEvent::Notice {
                    to: player,
                    notice: Notice::ProtectionOver,
                });
            }
        }
        self.emit(MatchEvent::RoundClock { remaining });
    }

    fn round_announce(&mut self, remaining: u32) {
        self.emit(MatchEvent::Feed {
            line: FeedLine::RoundTime { remaining },
        });
    }

    fn round_complete(&mut self) {
        self.round_timer = None;
        if self.match_over {
            return;
        }
        let winner = self.winning_side();
        debug!(match_id = %self.id, winner = ?winner, "Round clock expired");
        self.game_end(winner);
    }

    // =========================================================================
    // Spawning
    // =========================================================================

    /// Place a combatant at the next spawn of their team and start a life
    pub(super) fn spawn_player(&mut self, player: PlayerId) {
        let Some(side) = self.roster.side_of(player) else {
            return;
        };
        let location = self.spawns.next(SpawnPool::Team(side));
        self.emit(MatchEvent::Teleport {
            player,
            location: location.clone(),
        });
        self.emit(MatchEvent::Effect {
            effect: Effect::EquipLoadout,
            players: vec![player],
        });
        self.spawn_points.insert(player, location);

        let offense = self.stats.get(&player).map(|s| s.offense()).unwrap_or_default();
        self.life_offense.insert(player, offense);

        self.emit(MatchEvent::Equip {
            player,
            role: TeamRole::Team(side),
            settings: self.settings,
        });

        let gifts = self.ctx.config.gifts;
        if gifts.enabled && self.rng.gen_range(0..100) < gifts.chance_percent {
            self.emit(MatchEvent::Gift { player });
        }

        self.emit(MatchEvent::Notice {
            to: player,
            notice: Notice::BeInTeam { side },
        });

        let timing = self.ctx.config.timing;
        if timing.protection_time > 0 {
            self.survival.protect(player, timing.protection_time);
            self.emit(MatchEvent::Notice {
                to: player,
                notice: Notice::Protection {
                    units: timing.protection_time,
                },
            });
        }
        if timing.just_respawned_ticks > 0 {
            self.just_respawned
                .insert(player, timing.just_respawned_ticks);
        }
    }

    fn spawn_spectator(&mut self, player: PlayerId) {
        let location = self.spawns.next(SpawnPool::Spectators);
        self.emit(MatchEvent::Teleport {
            player,
            location: location.clone(),
        });
        self.spawn_points.insert(player, location);
        self.emit(MatchEvent::Equip {
            player,
            role: TeamRole::Spectator,
            settings: self.settings,
        });
        self.emit(MatchEvent::Notice {
            to: player,
            notice: Notice::BeSpectator,
        });
    }

    // =========================================================================
    // Game end
    // =========================================================================

    /// End the match once; `None` is a draw
    pub(super) fn game_end(&mut self, winner: Option<Side>) {
        if self.match_over {
            return;
        }
        self.match_over = true;
        self.phase = MatchPhase::Over;
        self.end_timers();

        self.emit(MatchEvent::MatchEnding);
        let combatants: Vec<PlayerId> = self.roster.combatants().collect();
        for player in combatants {
            self.emit(MatchEvent::PlayerRemoved { player });
        }

        self.outcome = match winner {
            Some(side) => MatchOutcome::decided(&self.roster, side),
            None => MatchOutcome::draw(),
        };

        let last_locations: HashMap<PlayerId, Location> = self
            .roster
            .everyone()
            .filter_map(|p| {
                self.ctx
                    .positions
                    .position(p)
                    .or_else(|| self.spawn_points.get(&p).cloned())
                    .map(|l| (p, l))
            })
            .collect();

        let report = MatchReport::build(
            self.id,
            &self.arena,
            self.outcome.clone(),
            &self.roster,
            &self.stats,
            &last_locations,
            self.created_at,
        );

        info!(
            match_id = %self.id,
            arena = %self.arena,
            draw = self.outcome.is_draw(),
            winner = self.outcome.win_label(),
            "Match ended"
        );

        self.emit(MatchEvent::MatchEnded {
            report: Box::new(report),
        });
    }

    pub(super) fn emit(&mut self, event: MatchEvent) {
        self.events.push(event);
    }
}

impl std::fmt::Debug for MatchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchSession")
            .field("id", &self.id)
            .field("arena", &self.arena)
            .field("phase", &self.phase)
            .field("roster", &self.roster)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::FeedLine;
    use crate::game::testkit::{self, Fixture};
    use crate::game::types::HitCause;

    #[test]
    fn test_construction_spawns_everyone_and_counts_down() {
        let mut fx = Fixture::new(2, 2, 1);
        let session = &mut fx.session;

        assert_eq!(session.phase(), MatchPhase::Countdown);
        assert_eq!(session.countdown_remaining(), Some(testkit::COUNTDOWN));
        assert_eq!(session.round_remaining(), None);

        let events = session.drain_events();
        let teleports = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::Teleport { .. }))
            .count();
        assert_eq!(teleports, 5);
        assert!(matches!(events[0], MatchEvent::TeamsAssigned { .. }));

        for player in session.roster().combatants() {
            assert_eq!(session.lives_left(player), Some(3));
            assert_eq!(session.respawns_left(player), Some(-1));
        }
    }

    #[test]
    fn test_empty_spawn_pool_fails_construction() {
        let mut arena = testkit::arena();
        arena.spectator_spawns.clear();
        let err = MatchSession::new(
            Uuid::new_v4(),
            arena,
            TeamRequest::default(),
            testkit::context(testkit::config()),
            1,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SessionError::EmptySpawnPool {
                pool: SpawnPool::Spectators,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_ticks_per_unit_is_rejected() {
        let mut config = testkit::config();
        config.timing.ticks_per_unit = 0;
        let err = MatchSession::new(
            Uuid::new_v4(),
            testkit::arena(),
            TeamRequest::default(),
            testkit::context(config),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::InvalidTiming { .. }));
    }

    #[test]
    fn test_degenerate_match_is_constructible() {
        let fx = Fixture::new(0, 0, 0);
        assert!(fx.session.team(Side::Red).is_empty());
        assert!(fx.session.team(Side::Blue).is_empty());
    }

    #[test]
    fn test_countdown_goes_live() {
        let mut fx = Fixture::new(1, 1, 0);
        fx.go_live();

        let session = &mut fx.session;
        assert_eq!(session.phase(), MatchPhase::Live);
        assert_eq!(session.countdown_remaining(), None);
        assert_eq!(session.round_remaining(), Some(60));

        let events = session.drain_events();
        assert!(events.iter().any(|e| matches!(e, MatchEvent::MatchLive)));
        assert!(events.iter().any(|e| matches!(
            e,
            MatchEvent::Feed {
                line: FeedLine::SettingsInfo {
                    lives: 3,
                    respawns: None,
                    round_time: 60
                }
            }
        )));
        assert!(events.iter().any(|e| matches!(e, MatchEvent::AllVisible { .. })));
    }

    #[test]
    fn test_countdown_freezes_wandering_players() {
        let mut fx = Fixture::new(1, 1, 0);
        let red = fx.red(0);
        let spawn = fx.session.spawn_points[&red].clone();
        let mut moved = Location::new(spawn.world.clone(), spawn.x + 3.0, spawn.y, spawn.z);
        moved.yaw = 45.0;
        fx.positions.set(red, moved);
        fx.session.drain_events();

        fx.ticks(1);
        let events = fx.session.drain_events();
        let back = events.iter().find_map(|e| match e {
            MatchEvent::Teleport { player, location } if *player == red => Some(location.clone()),
            _ => None,
        });
        let back = back.expect("wandering player teleported back");
        assert_eq!(back.block(), spawn.block());
        assert_eq!(back.yaw, 45.0);
    }

    #[test]
    fn test_benched_player_is_not_frozen_or_revealed() {
        let mut fx = Fixture::with_settings(2, 1, 0, |c| {
            c.defaults.lives = 1;
            c.defaults.respawns = 0;
        });
        let (red, blue) = (fx.red(0), fx.blue(0));
        fx.session.on_hit(red, blue, HitCause::Ball);
        assert!(fx.session.is_out(red));

        let spawn = fx.session.spawn_points[&red].clone();
        fx.positions.set(
            red,
            Location::new(spawn.world.clone(), spawn.x + 30.0, spawn.y, spawn.z),
        );
        fx.session.drain_events();

        fx.go_live();
        let events = fx.session.drain_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, MatchEvent::Teleport { player, .. } if *player == red)));
        let visible = events.iter().find_map(|e| match e {
            MatchEvent::AllVisible { players } => Some(players.clone()),
            _ => None,
        });
        let visible = visible.expect("match went live");
        assert!(!visible.contains(&red));
        assert!(visible.contains(&blue));
    }

    #[test]
    fn test_round_timeout_with_equal_survivors_is_draw() {
        let mut fx = Fixture::new(1, 1, 0);
        fx.go_live();
        fx.ticks(60);

        let session = &mut fx.session;
        assert!(session.is_over());
        assert_eq!(session.phase(), MatchPhase::Over);
        let outcome = session.outcome().unwrap();
        assert!(outcome.is_draw());
        assert!(outcome.winners.is_empty());
        assert!(outcome.losers.is_empty());

        let ended = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, MatchEvent::MatchEnded { .. }))
            .count();
        assert_eq!(ended, 1);

        // further ticks do nothing
        fx.ticks(10);
        assert!(fx.session.drain_events().is_empty());
    }

    #[test]
    fn test_round_timeout_prefers_more_survivors() {
        let mut fx = Fixture::with_settings(2, 1, 0, |c| {
            c.defaults.lives = 1;
            c.defaults.respawns = 0;
            c.timing.protection_time = 0;
        });
        fx.go_live();
        fx.ticks(60);

        let outcome = fx.session.outcome().unwrap();
        assert_eq!(outcome.winning_side, Some(Side::Red));
        assert_eq!(outcome.winners.len(), 2);
        assert_eq!(outcome.losers.len(), 1);
    }

    #[test]
    fn test_protection_decays_on_round_ticks() {
        let mut fx = Fixture::with_settings(1, 1, 0, |c| c.timing.protection_time = 3);
        let red = fx.red(0);
        fx.go_live();
        assert!(fx.session.is_protected(red));

        fx.ticks(2);
        assert!(fx.session.is_protected(red));
        fx.session.drain_events();

        fx.ticks(1);
        assert!(!fx.session.is_protected(red));
        let events = fx.session.drain_events();
        assert!(events
            .iter()
            .any(|e| e.notice_for(red) == Some(&Notice::ProtectionOver)));
    }

    #[test]
    fn test_just_respawned_window_closes() {
        let mut fx = Fixture::with_settings(1, 1, 0, |c| c.timing.just_respawned_ticks = 2);
        let red = fx.red(0);
        assert!(fx.session.is_just_respawned(red));
        fx.ticks(2);
        assert!(!fx.session.is_just_respawned(red));
    }

    #[test]
    fn test_end_timers_twice_is_harmless() {
        let mut fx = Fixture::new(1, 1, 0);
        fx.session.end_timers();
        fx.session.end_timers();
        fx.ticks(50);
        assert_eq!(fx.session.phase(), MatchPhase::Countdown);
        assert!(!fx.session.is_over());
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let a = Fixture::seeded(2, 2, 0, 99);
        let b = Fixture::seeded(2, 2, 0, 99);
        let red_a = a.session.spawn_points[&a.red(0)].clone();
        let red_b = b.session.spawn_points[&b.red(0)].clone();
        assert_eq!(red_a, red_b);
    }
}
