use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SoundtrackError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Source ids the detector understands.
pub const KNOWN_SOURCES: &[&str] = &["playerctl", "wsl", "applescript"];

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub detect: DetectConfig,
    pub format: FormatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub enabled: bool,
    pub timeout_ms: u64,
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectConfig {
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    pub icon: String,
    pub status_max_width: usize,
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, SoundtrackError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, SoundtrackError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let user_str = std::fs::read_to_string(path)?;
        Self::from_toml(&user_str)
    }

    /// Parse a (possibly partial) user config; missing keys take the
    /// built-in defaults.
    pub fn from_toml(user_str: &str) -> Result<Self, SoundtrackError> {
        let mut merged: toml::Table = DEFAULT_CONFIG
            .parse()
            .map_err(|e: toml::de::Error| SoundtrackError::Config(e.to_string()))?;
        let user: toml::Table = user_str
            .parse()
            .map_err(|e: toml::de::Error| SoundtrackError::Config(e.to_string()))?;
        merge_tables(&mut merged, user);

        let config: AppConfig = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| SoundtrackError::Config(e.to_string()))?;

        for source in &config.detect.sources {
            if !KNOWN_SOURCES.contains(&source.as_str()) {
                warn!(source = %source, "Unknown detection source in config");
            }
        }
        Ok(config)
    }

    /// Write the commented built-in config to `path`, refusing to overwrite.
    pub fn write_default(path: &Path) -> Result<(), SoundtrackError> {
        if path.exists() {
            return Err(SoundtrackError::Config(format!(
                "{} already exists",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, DEFAULT_CONFIG)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, SoundtrackError> {
        toml::to_string_pretty(self).map_err(|e| SoundtrackError::Config(e.to_string()))
    }

    /// Per-source detection budget.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.general.timeout_ms.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.general.poll_interval_secs.max(1))
    }

    /// Path to user config file (XDG on Linux, Application Support on macOS).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("soundtrack.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "soundtrack")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_toml("").expect("built-in default config is valid TOML")
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert!(config.general.enabled);
        assert_eq!(config.general.timeout_ms, 5000);
        assert_eq!(config.general.poll_interval_secs, 5);
        assert_eq!(config.detect.sources, KNOWN_SOURCES);
        assert_eq!(config.format.icon, "🎵");
    }

    #[test]
    fn test_partial_user_config() {
        let config = AppConfig::from_toml(
            r#"
            [general]
            timeout_ms = 1500

            [detect]
            sources = ["wsl"]
            "#,
        )
        .unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(1500));
        assert!(config.general.enabled);
        assert_eq!(config.general.poll_interval_secs, 5);
        assert_eq!(config.detect.sources, vec!["wsl".to_string()]);
        assert_eq!(config.format.status_max_width, 48);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[general\nenabled = ").unwrap_err();
        assert!(matches!(err, SoundtrackError::Config(_)));
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let err = AppConfig::from_toml("[general]\nenabled = \"yes\"").unwrap_err();
        assert!(matches!(err, SoundtrackError::Config(_)));
    }

    #[test]
    fn test_zero_durations_are_clamped() {
        let config =
            AppConfig::from_toml("[general]\ntimeout_ms = 0\npoll_interval_secs = 0").unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(1));
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = config.to_toml_string().unwrap();
        let deserialized = AppConfig::from_toml(&serialized).unwrap();
        assert_eq!(deserialized.general.timeout_ms, config.general.timeout_ms);
        assert_eq!(deserialized.detect.sources, config.detect.sources);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(config.general.enabled);
    }

    #[test]
    fn test_write_default_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        AppConfig::write_default(&path).unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.general.timeout_ms, 5000);

        let err = AppConfig::write_default(&path).unwrap_err();
        assert!(matches!(err, SoundtrackError::Config(_)));
    }
}
