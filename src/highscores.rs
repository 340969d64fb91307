//! Best score persistence
//!
//! A single scalar under one key. Reads fall back to 0 and writes never
//! interrupt play; failures are only logged.

use crate::platform::KeyValueStore;

/// Persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub value: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pixel_invaders_high_score";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Load from a store, defaulting to 0 on any failure
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(value) => {
                    log::info!("Loaded high score {}", value);
                    Self { value }
                }
                Err(err) => {
                    log::warn!("Ignoring malformed high score {:?}: {}", raw, err);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(err) => {
                log::warn!("Failed to read high score: {}", err);
                Self::default()
            }
        }
    }

    /// Record `score` if it beats the stored value; returns true when it did
    pub fn submit(&mut self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        self.save(store);
        true
    }

    /// Write the current value (best effort)
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.value.to_string()) {
            Ok(()) => log::debug!("High score saved ({})", self.value),
            Err(err) => log::warn!("Failed to save high score: {}", err),
        }
    }
}
