//! Player settings and preferences
//!
//! Stored as JSON next to the binary (or wherever `--settings` points).
//! Missing fields fall back to their defaults so older files keep loading.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

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

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(SettingsError::UnknownPreset(s.to_string())),
        }
    }
}

/// Failure to read or write a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    UnknownPreset(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings file I/O failed: {e}"),
            SettingsError::Parse(e) => write!(f, "settings file is not valid JSON: {e}"),
            SettingsError::UnknownPreset(name) => write!(f, "unknown quality preset '{name}'"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::UnknownPreset(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Caps the particle budget
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Ball trails
    pub trails: bool,
    /// Particle effects (trails and brick bursts)
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            trails: true,
            particles: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Trails need particles enabled as well
    pub fn effective_trails(&self) -> bool {
        self.trails && self.particles
    }

    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!("LOW".parse::<QualityPreset>().unwrap(), QualityPreset::Low);
        assert_eq!("med".parse::<QualityPreset>().unwrap(), QualityPreset::Medium);
        assert!(matches!(
            "ultra".parse::<QualityPreset>(),
            Err(SettingsError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_particle_budget() {
        let high = Settings {
            quality: QualityPreset::High,
            ..Settings::default()
        };
        assert_eq!(high.max_particles(), 2000);
        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        assert_eq!(settings.max_particles(), 0);
        assert!(!settings.effective_trails());
    }

    #[test]
    fn test_mute_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"quality": "Low", "muted": true}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.muted);
        assert!(settings.trails);
        assert_eq!(settings.music_volume, 0.7);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(Settings::from_json("{"), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_save_then_load() {
        let file = format!("brick-breaker-settings-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file);
        let settings = Settings {
            quality: QualityPreset::High,
            sfx_volume: 0.5,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("brick-breaker-does-not-exist.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
    }
}
