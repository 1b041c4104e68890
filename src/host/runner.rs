//! Per-match task: owns the tick loop and serialises every entry point

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::game::{HitCause, HitOutcome, MatchEvent, MatchReport, MatchSession, PlayerId};

use super::HostError;

const COMMAND_CAPACITY: usize = 256;
const EVENT_CAPACITY: usize = 1024;

/// Session shared between its runner and synchronous readers
pub type SharedSession = Arc<Mutex<MatchSession>>;

/// Inbound combat and activity events for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCommand {
    Hit {
        target: PlayerId,
        shooter: PlayerId,
        cause: HitCause,
    },
    Died { player: PlayerId },
    Left { player: PlayerId },
    Shot { player: PlayerId },
    Grenade { player: PlayerId },
    Airstrike { player: PlayerId },
}

/// Handle to a running match
#[derive(Clone)]
pub struct MatchHandle {
    pub id: Uuid,
    pub arena: String,
    pub command_tx: mpsc::Sender<MatchCommand>,
    pub event_tx: broadcast::Sender<MatchEvent>,
    session: SharedSession,
}

impl MatchHandle {
    /// Queue a command for the next tick
    pub async fn send(&self, command: MatchCommand) -> Result<(), HostError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| HostError::MatchClosed(self.id))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MatchEvent> {
        self.event_tx.subscribe()
    }

    /// Read the session under its lock
    pub fn with_session<R>(&self, f: impl FnOnce(&MatchSession) -> R) -> R {
        f(&self.session.lock())
    }

    pub fn player_count(&self) -> usize {
        self.with_session(|s| s.roster().everyone().count())
    }

    pub fn is_over(&self) -> bool {
        self.with_session(|s| s.is_over())
    }
}

/// The task side of a match
pub struct MatchRunner {
    id: Uuid,
    session: SharedSession,
    command_rx: mpsc::Receiver<MatchCommand>,
    event_tx: broadcast::Sender<MatchEvent>,
    tick: Duration,
}

impl MatchRunner {
    pub fn new(session: MatchSession, tick: Duration) -> (Self, MatchHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let id = session.id();
        let arena = session.arena().to_string();
        let session = Arc::new(Mutex::new(session));

        let handle = MatchHandle {
            id,
            arena,
            command_tx,
            event_tx: event_tx.clone(),
            session: session.clone(),
        };
        let runner = Self {
            id,
            session,
            command_rx,
            event_tx,
            tick,
        };

        (runner, handle)
    }

    /// Run the tick loop until the match is over; returns the final report
    pub async fn run(mut self) -> Option<MatchReport> {
        info!(match_id = %self.id, tick_ms = self.tick.as_millis() as u64, "Match runner started");

        let mut tick_interval = interval(self.tick);
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut report = None;
        loop {
            tick_interval.tick().await;

            let (events, over) = {
                let mut session = self.session.lock();
                process_commands(&mut self.command_rx, &mut session);
                session.tick();
                (session.drain_events(), session.is_over())
            };

            for event in events {
                if let MatchEvent::MatchEnded { report: final_report } = &event {
                    report = Some(final_report.as_ref().clone());
                }
                // no subscribers is fine
                let _ = self.event_tx.send(event);
            }

            if over {
                break;
            }
        }

        info!(match_id = %self.id, "Match runner stopped");
        report
    }
}

/// Apply every queued command, in arrival order
fn process_commands(command_rx: &mut mpsc::Receiver<MatchCommand>, session: &mut MatchSession) {
    while let Ok(command) = command_rx.try_recv() {
        let applied = match command {
            MatchCommand::Hit {
                target,
                shooter,
                cause,
            } => session.on_hit(target, shooter, cause) != HitOutcome::Ignored,
            MatchCommand::Died { player } => session.on_death(player),
            MatchCommand::Left { player } => session.left(player),
            MatchCommand::Shot { player } => session.on_shot(player),
            MatchCommand::Grenade { player } => session.on_grenade(player),
            MatchCommand::Airstrike { player } => session.on_airstrike(player),
        };
        if !applied {
            debug!(match_id = %session.id(), ?command, "Stale command ignored");
        }
    }
}
