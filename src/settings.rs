//! Playfield configuration
//!
//! Geometry the simulation is built against, loaded once at startup.
//! A missing or malformed settings file falls back to defaults.

use serde::{Deserialize, Serialize};

/// Playfield geometry and session rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Playfield width in pixels
    pub width: i32,
    /// Playfield height in pixels
    pub height: i32,
    /// Height of the HUD strip reserved at the top
    pub hud_height: i32,
    /// Lives granted at each level (re)build
    pub max_lives: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 900,
            height: 640,
            hud_height: 44,
            max_lives: 3,
        }
    }
}

impl Settings {
    const FILE_NAME: &'static str = "pond-crossing.json";

    /// Load settings from the working directory, falling back to defaults.
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::FILE_NAME);
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed {}: {}", Self::FILE_NAME, err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the working directory (best effort).
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            if std::fs::write(Self::FILE_NAME, json).is_ok() {
                log::info!("Settings saved");
            }
        }
    }
}
