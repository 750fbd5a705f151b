//! Best score tracking
//!
//! A single integer under a fixed key. Read once at startup, rewritten as
//! `max(previous, current)` whenever the score changes.

use crate::persistence::KeyValueStore;

/// Best score ever reached on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "htf_highscore";

    pub fn new() -> Self {
        Self { value: 0 }
    }

    /// Parse a stored value. Anything unreadable counts as no score.
    pub fn parse(raw: Option<&str>) -> Self {
        let value = raw
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(|v| v.clamp(0, u32::MAX as i64) as u32)
            .unwrap_or(0);
        Self { value }
    }

    /// Load from a store, defaulting to 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let best = Self::parse(store.get(Self::STORAGE_KEY).as_deref());
        log::info!("Best score: {}", best.value);
        best
    }

    /// Fold in a score. Returns true if it beat the previous best.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Write the current value; failures are ignored
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if !store.set(Self::STORAGE_KEY, &self.value.to_string()) {
            log::warn!("Could not persist best score {}", self.value);
        }
    }
}
