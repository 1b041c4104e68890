//! Match hosting: one tokio task per match, driven by an interval tick

pub mod registry;
pub mod runner;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::game::{MatchEvent, MatchReport, MatchSession};

pub use registry::MatchRegistry;
pub use runner::{MatchCommand, MatchHandle, MatchRunner, SharedSession};

/// Host errors
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Match {0} is no longer running")]
    MatchClosed(Uuid),

    #[error("Match {0} is already registered")]
    DuplicateMatch(Uuid),
}

/// A registered, running match
pub struct SpawnedMatch {
    pub handle: MatchHandle,
    /// Subscribed before the first tick, so nothing is missed
    pub events: broadcast::Receiver<MatchEvent>,
    pub task: JoinHandle<Option<MatchReport>>,
}

/// Register `session` and run it on its own task. The match removes itself
/// from the registry when it ends.
pub fn spawn_match(
    registry: &Arc<MatchRegistry>,
    session: MatchSession,
    tick: Duration,
) -> Result<SpawnedMatch, HostError> {
    let (runner, handle) = MatchRunner::new(session, tick);
    let events = handle.subscribe();
    registry.insert(handle.clone())?;

    let id = handle.id;
    let registry = registry.clone();
    let task = tokio::spawn(async move {
        let report = runner.run().await;
        registry.remove(&id);
        report
    });

    Ok(SpawnedMatch {
        handle,
        events,
        task,
    })
}
