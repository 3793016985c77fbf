//! Persisted best score
//!
//! Stored as a bare JSON integer under one key, read once at session start
//! and written only when a round's final score beats it. A failing store
//! costs the player the record, never the session.

use serde::{Deserialize, Serialize};

use crate::platform::storage::StorageBackend;

/// Best score achieved on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flap_dash_highscore";

    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a round's final score beats the stored best
    #[inline]
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Take a round's final score; returns true when the best improved
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load the stored best, defaulting to 0 when absent or unreadable
    pub fn load(store: &dyn StorageBackend) -> Self {
        if let Some(raw) = store.get(Self::STORAGE_KEY) {
            match raw.trim().parse::<u32>() {
                Ok(best) => {
                    log::info!("Loaded high score: {best}");
                    return Self { best };
                }
                Err(e) => log::warn!("Stored high score unreadable ({e}), starting at 0"),
            }
        }
        Self::new()
    }

    /// Persist the stored best; failure is logged and ignored
    pub fn save(&self, store: &dyn StorageBackend) {
        if let Err(e) = store.set(Self::STORAGE_KEY, &self.best.to_string()) {
            log::warn!("Failed to save high score: {e}");
        }
    }
}
