//! User settings, stored as TOML
//!
//! ```toml
//! session_size = 20
//! default_mode = "native-to-target"
//!
//! [voice]
//! command = "espeak-ng"
//! voice = "th"
//! rate = 1.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::{JsonCardStore, StoreError};
use crate::quiz::{QuizMode, DEFAULT_SESSION_SIZE};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not write settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where cards.json lives; defaults to the platform data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_session_size")]
    pub session_size: usize,
    #[serde(default)]
    pub default_mode: QuizMode,
    #[serde(default)]
    pub voice: VoiceSettings,
}

fn default_session_size() -> usize {
    DEFAULT_SESSION_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            session_size: default_session_size(),
            default_mode: QuizMode::default(),
            voice: VoiceSettings::default(),
        }
    }
}

/// Text-to-speech settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// External program that speaks its last argument; none means silent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Speaking rate relative to normal speed
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_true() -> bool {
    true
}

fn default_rate() -> f32 {
    1.0
}

fn default_lang() -> String {
    "th-TH".to_string()
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
            args: Vec::new(),
            voice: None,
            rate: default_rate(),
            lang: default_lang(),
        }
    }
}

impl Settings {
    /// Get the default settings path (e.g., ~/.config/tango/config.toml)
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("tango").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load settings from `path`; a missing file gives the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolved card data directory
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(JsonCardStore::default_data_dir()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(&temp.path().join("config.toml")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.session_size, 20);
        assert_eq!(settings.voice.rate, 1.0);
        assert_eq!(settings.voice.lang, "th-TH");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "default_mode = \"zhh-jp\"\n\n[voice]\ncommand = \"espeak-ng\"\nrate = 1.5\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.default_mode, QuizMode::TargetToNative);
        assert_eq!(settings.session_size, 20);
        assert_eq!(settings.voice.command.as_deref(), Some("espeak-ng"));
        assert_eq!(settings.voice.rate, 1.5);
        assert!(settings.voice.enabled);
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.session_size = 10;
        settings.data_dir = Some(temp.path().join("data"));
        settings.voice.voice = Some("th".to_string());
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
        assert_eq!(settings.data_dir().unwrap(), temp.path().join("data"));
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "session_size = \"many\"").unwrap();

        assert!(matches!(Settings::load(&path), Err(ConfigError::Parse(_))));
    }
}
