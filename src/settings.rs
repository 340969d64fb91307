//! Player preferences
//!
//! Persisted as JSON next to the high score.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Silence every sound
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pixel_invaders_settings";

    /// Volume actually sent to the audio sink
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Set master volume (clamped to 0.0 - 1.0)
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring unreadable settings: {}", err);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Failed to read settings: {}", err);
                Self::default()
            }
        }
    }

    /// Save settings (best effort)
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Failed to encode settings: {}", err);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Failed to save settings: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_roundtrip_through_store() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.toggle_mute();
        settings.set_master_volume(1.7);
        settings.save(&mut store);

        let loaded = Settings::load(&store);
        assert!(loaded.muted);
        assert_eq!(loaded.master_volume, 1.0);
        assert_eq!(loaded.effective_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, r#"{"muted":true}"#).unwrap();
        let loaded = Settings::load(&store);
        assert!(loaded.muted);
        assert_eq!(loaded.master_volume, 0.8);
    }

    #[test]
    fn test_garbage_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{{{").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
