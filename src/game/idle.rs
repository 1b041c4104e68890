//! Idle (afk) strike bookkeeping
//!
//! Strikes outlive a single match, so the ledger is injected into every
//! session rather than owned by one.

use dashmap::DashMap;

use super::types::PlayerId;

/// Consecutive idle lives per player
pub trait IdleLedger: Send + Sync {
    fn strikes(&self, player: PlayerId) -> u32;

    /// Add one strike and return the new count
    fn add_strike(&self, player: PlayerId) -> u32;

    fn clear(&self, player: PlayerId);
}

/// Concurrent in-memory ledger shared by all sessions of a host
#[derive(Debug, Default)]
pub struct SharedIdleLedger {
    strikes: DashMap<PlayerId, u32>,
}

impl SharedIdleLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdleLedger for SharedIdleLedger {
    fn strikes(&self, player: PlayerId) -> u32 {
        self.strikes.get(&player).map(|s| *s).unwrap_or(0)
    }

    fn add_strike(&self, player: PlayerId) -> u32 {
        let mut entry = self.strikes.entry(player).or_insert(0);
        *entry += 1;
        *entry
    }

    fn clear(&self, player: PlayerId) {
        self.strikes.remove(&player);
    }
}
