//! Player settings and preferences
//!
//! Persisted in LocalStorage on the web. Native builds read a JSON file
//! named by the `SHIFT_MASTER_SETTINGS` environment variable.

use std::str::FromStr;

use glam::DVec2;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::platform::Key;

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key that casts the held spell
    pub spell_key: char,
    /// Log level name (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
    /// Viewport assumed until the host reports a window size
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spell_key: 'S',
            log_level: "info".to_string(),
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl Settings {
    /// Parsed log level, `Info` if the name is unknown
    pub fn log_level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn viewport(&self) -> DVec2 {
        DVec2::new(self.viewport_width, self.viewport_height)
    }

    /// Game key bound to a DOM key name
    pub fn key_for(&self, name: &str) -> Option<Key> {
        Key::from_key_name(name, self.spell_key)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "shift_master_settings";

    /// Environment variable naming the native settings file
    pub const ENV_VAR: &'static str = "SHIFT_MASTER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> bool {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return false;
        };
        self.write_with("LocalStorage", |json| {
            storage.set_item(Self::STORAGE_KEY, json)
        })
    }

    /// Load settings from the file named by `SHIFT_MASTER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring settings file {path}: {e}");
                Self::default()
            }),
            Err(e) => {
                log::warn!("Cannot read settings file {path}: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to the file named by `SHIFT_MASTER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> bool {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            return false;
        };
        self.write_with(&path, |json| std::fs::write(&path, json))
    }

    /// Encode and hand the JSON to `write`, logging any failure
    ///
    /// Returns whether the settings were stored.
    fn write_with<E: std::fmt::Debug>(
        &self,
        target: &str,
        write: impl FnOnce(&str) -> Result<(), E>,
    ) -> bool {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot encode settings: {e}");
                return false;
            }
        };
        match write(&json) {
            Ok(()) => {
                log::info!("Settings saved to {target}");
                true
            }
            Err(e) => {
                log::warn!("Cannot write settings to {target}: {e:?}");
                false
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.spell_key, 'S');
        assert_eq!(settings.log_level(), LevelFilter::Info);
        assert_eq!(settings.viewport(), DVec2::new(1280.0, 720.0));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"spell_key": "Q"}"#).unwrap();
        assert_eq!(settings.spell_key, 'Q');
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_log_level_names() {
        let settings = Settings {
            log_level: "debug".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.log_level(), LevelFilter::Debug);
        let settings = Settings {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let settings = Settings::default();
        let saved = settings.write_with("memory", |_| Err("quota exceeded"));
        assert!(!saved);
    }

    #[test]
    fn test_write_hands_over_json() {
        let settings = Settings {
            spell_key: 'Z',
            ..Default::default()
        };
        let mut stored = String::new();
        let saved = settings.write_with("memory", |json| {
            stored = json.to_string();
            Ok::<(), std::io::Error>(())
        });
        assert!(saved);
        assert_eq!(Settings::from_json(&stored).unwrap(), settings);
    }

    #[test]
    fn test_key_binding() {
        let settings = Settings {
            spell_key: 'X',
            ..Default::default()
        };
        assert_eq!(settings.key_for("x"), Some(Key::Spell));
        assert_eq!(settings.key_for("s"), None);
        assert_eq!(settings.key_for("ArrowLeft"), Some(Key::Left));
    }
}
