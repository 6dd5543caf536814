//! Game settings and preferences
//!
//! Stored as JSON next to the binary (or wherever the caller points).

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAYER_VELOCITY, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::sim::level::Level;

/// Reasons settings cannot be read or written
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Case-insensitive preset name, as given on the command line
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Particle pool capacity for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Shake when the ball hits a solid brick
    pub screen_shake: bool,
    /// Ball trail particles
    pub particles: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,

    // === Game ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    /// Paddle speed in pixels per second
    pub paddle_speed: f32,
    /// Level files, played in order
    pub levels: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            screen_shake: true,
            particles: true,

            reduced_motion: false,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            seed: None,
            paddle_speed: PLAYER_VELOCITY,
            levels: vec![
                PathBuf::from("levels/one.level"),
                PathBuf::from("levels/two.level"),
                PathBuf::from("levels/three.level"),
                PathBuf::from("levels/four.level"),
            ],
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Bricks fill the full width and the upper half of the viewport
    pub fn level_area(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height / 2.0)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Load every configured level; files that fail are logged and skipped
    pub fn load_levels(&self) -> Vec<Level> {
        let area = self.level_area();
        self.levels
            .iter()
            .filter_map(|path| match Level::from_file(path, area) {
                Ok(level) => Some(level),
                Err(e) => {
                    log::warn!("Skipping level {}: {}", path.display(), e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("breakout-settings-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_preset_particle_caps() {
        assert_eq!(QualityPreset::Low.max_particles(), 100);
        assert_eq!(QualityPreset::Medium.max_particles(), 500);
        assert_eq!(QualityPreset::High.max_particles(), 2000);
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        let low = QualityPreset::Low;
        assert_eq!(QualityPreset::parse(low.as_str()), Some(low));
    }

    #[test]
    fn test_effective_toggles() {
        let mut settings = Settings {
            quality: QualityPreset::High,
            ..Settings::default()
        };
        assert_eq!(settings.max_particles(), 2000);
        assert!(settings.effective_screen_shake());

        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_level_area_is_upper_half() {
        let settings = Settings::default();
        assert_eq!(settings.viewport(), Vec2::new(1280.0, 720.0));
        assert_eq!(settings.level_area(), Vec2::new(1280.0, 360.0));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "seed": 7, "quality": "Low" }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.paddle_speed, PLAYER_VELOCITY);
        assert_eq!(settings.levels.len(), 4);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip.json");
        let settings = Settings {
            seed: Some(42),
            viewport_width: 800.0,
            levels: vec![PathBuf::from("a.level")],
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_bad_json_falls_back() {
        let path = temp_path("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(SettingsError::Json(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
        let _ = fs::remove_file(&path);

        assert!(matches!(
            Settings::load(temp_path("missing.json")),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_load_levels_skips_failures() {
        let good = temp_path("good.level");
        fs::write(&good, "1 2\n3 0\n").unwrap();
        let settings = Settings {
            levels: vec![temp_path("nope.level"), good.clone()],
            ..Settings::default()
        };
        let levels = settings.load_levels();
        let _ = fs::remove_file(&good);

        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].columns(), 2);
        let brick = levels[0].brick(1).unwrap();
        assert_eq!(brick.size, Vec2::new(640.0, 180.0));
    }
}
