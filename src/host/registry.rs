//! Registry of running matches

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::game::PlayerId;

use super::runner::MatchHandle;
use super::HostError;

/// Registry of all active matches
pub struct MatchRegistry {
    matches: DashMap<Uuid, MatchHandle>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self {
            matches: DashMap::new(),
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<MatchHandle> {
        self.matches.get(id).map(|m| m.value().clone())
    }

    pub fn insert(&self, handle: MatchHandle) -> Result<(), HostError> {
        match self.matches.entry(handle.id) {
            Entry::Occupied(_) => Err(HostError::DuplicateMatch(handle.id)),
            Entry::Vacant(slot) => {
                slot.insert(handle);
                Ok(())
            }
        }
    }

    pub fn remove(&self, id: &Uuid) -> Option<MatchHandle> {
        self.matches.remove(id).map(|(_, h)| h)
    }

    pub fn active_matches(&self) -> usize {
        self.matches.len()
    }

    pub fn total_players(&self) -> usize {
        self.matches
            .iter()
            .map(|m| m.value().player_count())
            .sum()
    }

    /// The running match `player` takes part in, if any
    pub fn find_by_player(&self, player: PlayerId) -> Option<MatchHandle> {
        self.matches
            .iter()
            .find(|m| m.value().with_session(|s| s.in_match(player) && !s.is_over()))
            .map(|m| m.value().clone())
    }
}

impl Default for MatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::game::testkit::Fixture;
    use crate::host::runner::MatchRunner;

    #[test]
    fn test_insert_lookup_remove() {
        let registry = MatchRegistry::new();
        let fx = Fixture::new(2, 1, 1);
        let red = fx.red(0);
        let (_runner, handle) = MatchRunner::new(fx.session, Duration::from_millis(5));
        let id = handle.id;

        registry.insert(handle.clone()).unwrap();
        assert!(matches!(
            registry.insert(handle),
            Err(HostError::DuplicateMatch(dup)) if dup == id
        ));

        assert_eq!(registry.active_matches(), 1);
        assert_eq!(registry.total_players(), 4);
        assert_eq!(registry.find_by_player(red).map(|h| h.id), Some(id));
        assert!(registry.find_by_player(PlayerId::new()).is_none());

        assert!(registry.remove(&id).is_some());
        assert!(registry.get(&id).is_none());
        assert_eq!(registry.active_matches(), 0);
    }
}
