//! Arena simulator - runs bot matches against the match engine
//!
//! Starts `SIM_MATCHES` matches on synthetic arenas, lets bots trade hits
//! until each match ends and logs every final report as JSON.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use futures::future::join_all;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use paintball_arena::config::{EngineConfig, SimConfig};
use paintball_arena::game::{
    ArenaDelta, ArenaLayout, HitCause, Location, MatchEvent, MatchReport, MatchSession, PlayerId,
    PositionBoard, SessionContext, SharedIdleLedger, Side, TeamRequest,
};
use paintball_arena::host::{spawn_match, MatchCommand, MatchHandle, MatchRegistry, SpawnedMatch};
use paintball_arena::util::time::{host_tick_duration, units_to_ticks, Stopwatch};

const BOT_CAUSES: [HitCause; 4] = [
    HitCause::Ball,
    HitCause::Ball,
    HitCause::Grenade,
    HitCause::Sniper,
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = EngineConfig::from_env().context("loading engine configuration")?;
    let sim = SimConfig::from_env().context("loading simulator configuration")?;

    init_tracing(&config.log_level);

    let tick = host_tick_duration(config.timing.host_tick_millis);
    let max_ticks = units_to_ticks(
        config.timing.countdown_start + config.defaults.round_time.max(0) as u32,
        config.timing.ticks_per_unit,
    );
    info!(
        matches = sim.matches,
        players_per_team = sim.players_per_team,
        tick_ms = tick.as_millis() as u64,
        max_ticks,
        "Starting arena simulator"
    );

    let config = Arc::new(config);
    let registry = Arc::new(MatchRegistry::new());
    let idle = Arc::new(SharedIdleLedger::new());
    let stopwatch = Stopwatch::new();

    let mut runs = Vec::with_capacity(sim.matches);
    for n in 0..sim.matches {
        let positions = Arc::new(PositionBoard::new());
        let ctx = SessionContext {
            config: config.clone(),
            positions: positions.clone(),
            idle: idle.clone(),
        };
        let seed = sim.seed.wrapping_add(n as u64);
        let session = MatchSession::new(
            Uuid::new_v4(),
            synthetic_arena(n),
            bot_teams(sim.players_per_team),
            ctx,
            seed,
        )
        .with_context(|| format!("creating match {n}"))?;

        let spawned = spawn_match(&registry, session, tick)?;
        runs.push(run_match(spawned, positions, seed, tick));
    }

    info!(
        active = registry.active_matches(),
        players = registry.total_players(),
        "Matches running"
    );

    let mut finished = 0;
    for result in join_all(runs).await {
        match result {
            Ok(Some(report)) => {
                finished += 1;
                info!(
                    match_id = %report.match_id,
                    winner = report.outcome.win_label(),
                    report = %serde_json::to_string(&report)?,
                    "Match report"
                );
            }
            Ok(None) => warn!("Match stopped without a report"),
            Err(e) => warn!(error = %e, "Match failed"),
        }
    }

    info!(
        finished,
        elapsed_ms = stopwatch.elapsed_ms(),
        "Simulation complete"
    );
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Two facing bases and a balcony, offset per match so worlds never collide
fn synthetic_arena(n: usize) -> ArenaLayout {
    let world = format!("sim-{n}");
    let base = |x: f64| {
        (0..3)
            .map(|i| Location::new(world.clone(), x, 64.0, f64::from(i) * 4.0))
            .collect::<Vec<_>>()
    };

    ArenaLayout {
        name: format!("sim-arena-{n}"),
        red_spawns: base(0.0),
        blue_spawns: base(60.0),
        spectator_spawns: vec![Location::new(world.clone(), 30.0, 80.0, 4.0)],
        delta: ArenaDelta {
            lives: 1,
            ..ArenaDelta::default()
        },
    }
}

fn bot_teams(per_team: usize) -> TeamRequest {
    let bots = |count: usize| (0..count).map(|_| PlayerId::new()).collect::<Vec<_>>();
    TeamRequest {
        red: bots(per_team),
        blue: bots(per_team.saturating_sub(1)),
        spectators: bots(1),
        unassigned: bots(2),
    }
}

/// Drive one match to its end, mirroring teleports into the position board
async fn run_match(
    spawned: SpawnedMatch,
    positions: Arc<PositionBoard>,
    seed: u64,
    tick: Duration,
) -> anyhow::Result<Option<MatchReport>> {
    let SpawnedMatch {
        handle,
        mut events,
        task,
    } = spawned;

    let mirror = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(MatchEvent::Teleport { player, location }) => positions.set(player, location),
                Ok(MatchEvent::PlayerRemoved { player }) => positions.forget(player),
                Ok(MatchEvent::MatchEnded { .. }) | Err(RecvError::Closed) => break,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event mirror lagged"),
            }
        }
    });

    let bots = tokio::spawn(drive_bots(handle, ChaCha8Rng::seed_from_u64(seed), tick));

    let report = task.await.context("match task failed")?;
    bots.abort();
    let _ = mirror.await;
    Ok(report)
}

/// Random shots and hits between opposing bots until the match closes
async fn drive_bots(handle: MatchHandle, mut rng: ChaCha8Rng, tick: Duration) {
    loop {
        tokio::time::sleep(tick * 2).await;
        if handle.is_over() {
            break;
        }

        let (red, blue) = handle.with_session(|s| {
            let active = |side: Side| {
                s.team(side)
                    .iter()
                    .copied()
                    .filter(|p| !s.is_out(*p))
                    .collect::<Vec<_>>()
            };
            (active(Side::Red), active(Side::Blue))
        });
        let (Some(&a), Some(&b)) = (red.choose(&mut rng), blue.choose(&mut rng)) else {
            continue;
        };
        let (shooter, target) = if rng.gen_bool(0.5) { (a, b) } else { (b, a) };

        let mut commands = vec![MatchCommand::Shot { player: shooter }];
        if rng.gen_bool(0.3) {
            let cause = BOT_CAUSES.choose(&mut rng).copied().unwrap_or(HitCause::Ball);
            if cause == HitCause::Grenade {
                commands.push(MatchCommand::Grenade { player: shooter });
            }
            commands.push(MatchCommand::Hit {
                target,
                shooter,
                cause,
            });
        }
        if rng.gen_bool(0.01) {
            commands.push(MatchCommand::Died { player: target });
        }

        for command in commands {
            if handle.send(command).await.is_err() {
                return;
            }
        }
    }
}
