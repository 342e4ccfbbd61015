use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use stroop_core::{DisplayMode, Language};
use thiserror::Error;
use tracing::{info, warn};

/// Resolution used whenever the requested display setup cannot be applied
pub const SAFE_RESOLUTION: (u32, u32) = (1280, 720);

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: u32,
    pub screen_height: u32,
    pub display_mode: DisplayMode,
    pub language: Language,
    pub trial_count: usize,
    pub button_width: u32,
    pub button_height: u32,
    pub button_spacing: u32,
    pub font_size: u32,
    pub small_font_size: u32,
    pub square_size: u32,
    pub results_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SAFE_RESOLUTION.0,
            screen_height: SAFE_RESOLUTION.1,
            display_mode: DisplayMode::Fullscreen,
            language: Language::English,
            trial_count: 10,
            button_width: 150,
            button_height: 80,
            button_spacing: 20,
            font_size: 74,
            small_font_size: 36,
            square_size: 100,
            results_path: PathBuf::from("stroop_results.json"),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Defaults when the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(SettingsError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                info!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)
    }

    /// Falls back to a windowed safe resolution after a display failure
    pub fn apply_safe_display(&mut self) {
        (self.screen_width, self.screen_height) = SAFE_RESOLUTION;
        self.display_mode = DisplayMode::Windowed;
    }

    pub fn experiment(&self) -> ExperimentConfig {
        ExperimentConfig {
            trial_count: self.trial_count,
            ..ExperimentConfig::default()
        }
    }
}

/// Parameters of a single run
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    pub trial_count: usize,
    pub countdown_ms: u64,
    pub feedback_ms: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            trial_count: 10,
            countdown_ms: 3000,
            feedback_ms: 500,
        }
    }
}

/// Ratio of the surface to the 1920×1080 reference layout
pub fn scale_factor(width: u32, height: u32) -> f32 {
    (width as f32 / 1920.0).min(height as f32 / 1080.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(tag: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        std::env::temp_dir().join(format!("stroop_settings_{tag}_{suffix}"))
    }

    #[test]
    fn save_then_load_keeps_changes() {
        let dir = temp_dir("roundtrip");
        let path = dir.join("nested").join("stroop.json");
        let mut settings = Settings::default();
        settings.language = Language::Ukrainian;
        settings.trial_count = 4;

        settings.save(&path).expect("save settings");
        assert_eq!(Settings::load(&path).expect("load settings"), settings);

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "language": "russian", "display_mode": "noframe" }"#)
                .expect("parse");
        assert_eq!(settings.language, Language::Russian);
        assert_eq!(settings.display_mode, DisplayMode::Noframe);
        assert_eq!(settings.trial_count, 10);
        assert_eq!(settings.square_size, 100);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = temp_dir("broken");
        fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("stroop.json");
        fs::write(&path, "{ not json").expect("write");

        assert!(matches!(Settings::load(&path), Err(SettingsError::Json(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());

        fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn safe_display_is_windowed_720p() {
        let mut settings = Settings {
            screen_width: 2560,
            screen_height: 1440,
            ..Settings::default()
        };
        settings.apply_safe_display();
        assert_eq!((settings.screen_width, settings.screen_height), (1280, 720));
        assert_eq!(settings.display_mode, DisplayMode::Windowed);
    }

    #[test]
    fn scale_tracks_smaller_axis() {
        assert_eq!(scale_factor(1920, 1080), 1.0);
        assert_eq!(scale_factor(960, 1080), 0.5);
        assert_eq!(scale_factor(1920, 540), 0.5);
    }
}
