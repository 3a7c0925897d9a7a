//! Shared state storage with a single-writer discipline
//!
//! Readers take cheap snapshots; writers hold the lock for one short
//! critical section per decoded response.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::DeviceState;

/// Thread-safe holder of the [`DeviceState`]
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    state: Arc<RwLock<DeviceState>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> DeviceState {
        self.state.read().clone()
    }

    /// Read a value out of the current state without cloning all of it
    pub fn read<R>(&self, f: impl FnOnce(&DeviceState) -> R) -> R {
        f(&self.state.read())
    }

    /// Mutate the state under the write lock
    pub fn update<R>(&self, f: impl FnOnce(&mut DeviceState) -> R) -> R {
        f(&mut self.state.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PowerState;

    #[test]
    fn test_update_visible_to_clones() {
        let store = StateStore::new();
        let other = store.clone();

        store.update(|state| state.power = PowerState::On);

        assert_eq!(other.read(|state| state.power), PowerState::On);
        assert_eq!(other.snapshot().power, PowerState::On);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = StateStore::new();
        let snapshot = store.snapshot();
        store.update(|state| state.muted = true);

        assert!(!snapshot.muted);
        assert!(store.read(|state| state.muted));
    }
}
