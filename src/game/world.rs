//! Read access to where players currently are
//!
//! Movement belongs to the host world; the engine only asks for positions when
//! freezing the countdown and when judging idleness.

use dashmap::DashMap;

use super::types::{Location, PlayerId};

/// Current player positions, `None` when unknown (e.g. disconnected)
pub trait PositionSource: Send + Sync {
    fn position(&self, player: PlayerId) -> Option<Location>;
}

/// Concurrent position table fed by the host world
#[derive(Debug, Default)]
pub struct PositionBoard {
    positions: DashMap<PlayerId, Location>,
}

impl PositionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, player: PlayerId, location: Location) {
        self.positions.insert(player, location);
    }

    pub fn forget(&self, player: PlayerId) {
        self.positions.remove(&player);
    }
}

impl PositionSource for PositionBoard {
    fn position(&self, player: PlayerId) -> Option<Location> {
        self.positions.get(&player).map(|l| l.value().clone())
    }
}
