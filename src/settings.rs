//! Game settings
//!
//! Persisted as a JSON file next to the game; every field has a default so a
//! partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_RATE;
use crate::persistence::{self, PersistError};
use crate::sim::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `frog*.png`, `road*.png` and `car*.png`
    pub asset_dir: PathBuf,
    /// Frames (and simulation ticks) per second
    pub frame_rate: u32,
    /// Fixed RNG seed for reproducible rounds; random when unset
    pub seed: Option<u64>,
    /// Difficulty preselected in the menu
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("images"),
            frame_rate: FRAME_RATE,
            seed: None,
            difficulty: Difficulty::Medium,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "road-hopper.json";

    /// Load settings from `path`.
    ///
    /// A missing file gives defaults; a malformed one is logged and also gives
    /// defaults.
    pub fn load(path: &Path) -> Self {
        match persistence::load_json::<Settings>(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Frame rate clamped to something a terminal can show
    fn sanitized(mut self) -> Self {
        if self.frame_rate == 0 || self.frame_rate > 240 {
            log::warn!("frame_rate {} out of range, using {}", self.frame_rate, FRAME_RATE);
            self.frame_rate = FRAME_RATE;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join(Settings::FILE_NAME));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.frame_rate, 60);
        assert_eq!(settings.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        std::fs::write(&path, r#"{ "seed": 9, "difficulty": "Hard" }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.asset_dir, PathBuf::from("images"));
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        std::fs::write(&path, "frame_rate = 30").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_round_trip_and_clamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        let settings = Settings {
            frame_rate: 0,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).frame_rate, FRAME_RATE);
    }
}
