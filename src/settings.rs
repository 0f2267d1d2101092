//! Runtime settings
//!
//! Persisted as JSON next to the binary. Gameplay tuning is not configurable
//! here; it lives in `crate::consts`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{STARTING_LIVES, VIEW_HEIGHT, VIEW_WIDTH};
use crate::error::Result;
use crate::input::KeyBindings;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === View ===
    /// Logical viewport in pixels; fireball apex heights scale with the height
    pub view_width: f32,
    pub view_height: f32,

    // === Session ===
    pub starting_lives: i32,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    pub scores_path: String,

    // === Input ===
    pub bindings: KeyBindings,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,

            starting_lives: STARTING_LIVES,
            seed: None,
            scores_path: "scores.json".to_string(),

            bindings: KeyBindings::default(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings, {} is unreadable: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Seed to run with: the configured one or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
