// SPDX-License-Identifier: MPL-2.0
//! Persisted user settings.
//!
//! The chosen language lives in a `settings.toml` file, written on every
//! accepted language change and read back at initialization.
//!
//! # Path Resolution
//!
//! The settings file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `PHRASEBOOK_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.toml";
const APP_NAME: &str = "phrasebook";

/// Environment variable overriding the settings directory.
pub const ENV_CONFIG_DIR: &str = "PHRASEBOOK_CONFIG_DIR";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    pub language: Option<String>,
}

fn default_settings_path() -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(ENV_CONFIG_DIR) {
        if !env_dir.is_empty() {
            return Some(PathBuf::from(env_dir).join(SETTINGS_FILE));
        }
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(SETTINGS_FILE);
        path
    })
}

/// Loads the settings from the default location, or defaults when no
/// file exists yet.
pub fn load() -> Result<Settings> {
    if let Some(path) = default_settings_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Settings::default())
}

/// Saves the settings to the default location.
pub fn save(settings: &Settings) -> Result<()> {
    if let Some(path) = default_settings_path() {
        return save_to_path(settings, &path);
    }
    Ok(())
}

/// Loads settings from an explicit path. Malformed TOML degrades to
/// defaults rather than erroring.
pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

/// Saves settings to an explicit path, creating parent directories.
pub fn save_to_path(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // Prevents parallel tests from interfering with each other's env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn save_and_load_round_trip_preserves_language() {
        let settings = Settings {
            language: Some("he-IL".to_string()),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let settings_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&settings, &settings_path).expect("failed to save settings");
        let loaded = load_from_path(&settings_path).expect("failed to load settings");

        assert_eq!(loaded.language, settings.language);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let settings_path = temp_dir.path().join("settings.toml");
        fs::write(&settings_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&settings_path).expect("load should not error");
        assert!(loaded.language.is_none());
    }

    #[test]
    fn load_from_path_errors_on_missing_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        assert!(load_from_path(&temp_dir.path().join("settings.toml")).is_err());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let settings_path = temp_dir.path().join("deep").join("path").join("settings.toml");
        let settings = Settings {
            language: Some("en-US".to_string()),
        };

        save_to_path(&settings, &settings_path).expect("save should create directories");
        assert!(settings_path.exists());
    }

    #[test]
    fn env_var_overrides_default_settings_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let temp_dir = tempdir().expect("failed to create temp dir");
        std::env::set_var(ENV_CONFIG_DIR, temp_dir.path());

        let settings = Settings {
            language: Some("de".to_string()),
        };
        save(&settings).expect("failed to save via env override");
        assert!(temp_dir.path().join(SETTINGS_FILE).exists());

        let loaded = load().expect("failed to load via env override");
        assert_eq!(loaded.language, Some("de".to_string()));

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn default_settings_have_no_language() {
        assert!(Settings::default().language.is_none());
    }
}
