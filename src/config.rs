//! Engine settings
//!
//! Animation timing, tile size and file locations, read from a JSON file in the
//! config directory. Anything missing falls back to the defaults below.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::animation::{AnimationTimings, FrameTiming};

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/engine_settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Pixels per tile edge
    pub tile_size: u32,
    /// Interpolation frames of a player step
    pub move_frames: u32,
    pub move_frame_ms: u64,
    /// Interpolation frames of a crate slide
    pub push_frames: u32,
    pub push_frame_ms: u64,
    /// Input debounce after a player step finishes
    pub cooldown_ms: u64,
    pub levels_file: String,
    pub log_file: String,
    /// Append the built-in level after the file levels
    pub include_builtin_level: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tile_size: 64,
            move_frames: 8,
            move_frame_ms: 25, // 200ms per step
            push_frames: 8,
            push_frame_ms: 50,
            cooldown_ms: 100,
            levels_file: "levels/levels.txt".to_string(),
            log_file: "sokoban.log".to_string(),
            include_builtin_level: true,
        }
    }
}

impl EngineSettings {
    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(SETTINGS_FILE)
    }

    /// Load settings from file, or return defaults if it is missing or unreadable
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn timings(&self) -> AnimationTimings {
        AnimationTimings {
            tile_size: self.tile_size,
            movement: FrameTiming::new(self.move_frames, Duration::from_millis(self.move_frame_ms)),
            push: FrameTiming::new(self.push_frames, Duration::from_millis(self.push_frame_ms)),
            cooldown: Duration::from_millis(self.cooldown_ms),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_animation_defaults() {
        assert_eq!(AnimationTimings::default(), EngineSettings::default().timings());
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let settings: EngineSettings = serde_json::from_str(r#"{ "tile_size": 32, "cooldown_ms": 0 }"#).unwrap();
        assert_eq!(32, settings.tile_size);
        assert_eq!(0, settings.cooldown_ms);
        assert_eq!(8, settings.move_frames);
        assert_eq!("levels/levels.txt", settings.levels_file);
    }

    #[test]
    fn missing_file_yields_defaults() {
        assert_eq!(EngineSettings::default(), EngineSettings::load_from("does/not/exist.json"));
    }

    #[test]
    fn zero_frames_are_clamped() {
        let settings = EngineSettings { move_frames: 0, ..EngineSettings::default() };
        assert_eq!(1, settings.timings().movement.frames);
    }
}
