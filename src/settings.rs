use dirs_next::home_dir;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::sync::mpsc;

/// Error type for settings loading/validation.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

pub const SECTION_DISPLAY: &str = "Display";
pub const SECTION_AESTHETICS: &str = "Aesthetics";

pub const KEY_LAUNCH_MODE: &str = "launch_mode";
pub const KEY_BACKGROUND: &str = "background";
pub const KEY_CUSTOM_BACKGROUND: &str = "custom_background";
pub const KEY_FONT: &str = "font";
pub const KEY_COLOR: &str = "color";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    #[default]
    Windowed,
    Fullscreen,
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchMode::Windowed => write!(f, "windowed"),
            LaunchMode::Fullscreen => write!(f, "fullscreen"),
        }
    }
}

impl LaunchMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "windowed" => Some(LaunchMode::Windowed),
            "fullscreen" => Some(LaunchMode::Fullscreen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub launch_mode: LaunchMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AestheticsSection {
    pub background: String,
    pub custom_background: String,
    pub font: String,
    pub color: String,
}

impl Default for AestheticsSection {
    fn default() -> Self {
        Self {
            background: "Dark Gray".to_string(),
            custom_background: "#2B2B2B".to_string(),
            font: "Roboto-Thin".to_string(),
            color: "#FF0000".to_string(),
        }
    }
}

/// Process-wide settings: two flat key/value sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "Display")]
    pub display: DisplaySection,
    #[serde(rename = "Aesthetics")]
    pub aesthetics: AestheticsSection,
}

/// A committed settings-panel edit: (section, key, new value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingChange {
    pub section: String,
    pub key: String,
    pub value: String,
}

/// Owns the settings, the backing file, and the observer list.
///
/// Settings load once at startup; every committed change is written
/// back to the file and dispatched to all subscribed observers.
pub struct SettingsStore {
    settings: Settings,
    path: PathBuf,
    observers: Vec<mpsc::UnboundedSender<SettingChange>>,
}

impl SettingsStore {
    /// Load settings. An explicit path must exist; otherwise common
    /// locations are searched, and when nothing is found defaults are
    /// used and written back so the panel has a file to persist into.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, SettingsError> {
        let (settings, path) = if let Some(p) = explicit {
            if !p.exists() {
                return Err(SettingsError::Validation(format!(
                    "Settings file not found: {}",
                    p.display()
                )));
            }
            (read_settings(&p)?, p)
        } else if let Some(p) = find_settings_file() {
            (read_settings(&p)?, p)
        } else {
            (Settings::default(), default_settings_path())
        };

        let store = Self {
            settings,
            path,
            observers: Vec::new(),
        };

        if !store.path.exists() {
            info!("no settings file found, writing defaults to {}", store.path.display());
            store.save()?;
        }

        Ok(store)
    }

    /// Build a store around an explicit path without touching disk.
    /// The file is created on the first committed change.
    pub fn with_settings(settings: Settings, path: PathBuf) -> Self {
        Self {
            settings,
            path,
            observers: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register an observer; every committed change is delivered to
    /// the returned channel.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SettingChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(tx);
        rx
    }

    /// Commit a single field edit: mutate, persist, notify.
    pub fn apply_change(&mut self, section: &str, key: &str, value: &str) -> Result<(), SettingsError> {
        match (section, key) {
            (SECTION_DISPLAY, KEY_LAUNCH_MODE) => {
                let mode = LaunchMode::parse(value).ok_or_else(|| {
                    SettingsError::Validation(format!(
                        "launch_mode must be windowed|fullscreen, got '{value}'"
                    ))
                })?;
                self.settings.display.launch_mode = mode;
            }
            (SECTION_AESTHETICS, KEY_BACKGROUND) => {
                self.settings.aesthetics.background = value.to_string();
            }
            (SECTION_AESTHETICS, KEY_CUSTOM_BACKGROUND) => {
                self.settings.aesthetics.custom_background = value.to_string();
            }
            (SECTION_AESTHETICS, KEY_FONT) => {
                self.settings.aesthetics.font = value.to_string();
            }
            (SECTION_AESTHETICS, KEY_COLOR) => {
                self.settings.aesthetics.color = value.to_string();
            }
            _ => {
                return Err(SettingsError::Validation(format!(
                    "unknown setting {section}.{key}"
                )));
            }
        }

        self.save()?;

        let change = SettingChange {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        };
        debug!("setting committed: {}.{} = {}", section, key, value);

        // Drop observers whose receiving end has gone away.
        self.observers.retain(|tx| tx.send(change.clone()).is_ok());

        Ok(())
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let yaml = serde_yaml::to_string(&self.settings)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }
}

/// Try common locations in order (first hit wins).
fn find_settings_file() -> Option<PathBuf> {
    if let Some(home) = home_dir() {
        let p = home.join(".config/klokka/config.yaml");
        if p.exists() {
            return Some(p);
        }
        let p = home.join(".config/klokka.yaml");
        if p.exists() {
            return Some(p);
        }
    }
    for candidate in &["klokka.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn default_settings_path() -> PathBuf {
    home_dir()
        .map(|h| h.join(".config/klokka/config.yaml"))
        .unwrap_or_else(|| PathBuf::from("klokka.yaml"))
}

fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let s = fs::read_to_string(path)?;
    let settings: Settings = serde_yaml::from_str(&s)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("klokka-settings-{tag}-{}.yaml", std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.display.launch_mode, LaunchMode::Windowed);
        assert_eq!(s.aesthetics.background, "Dark Gray");
        assert_eq!(s.aesthetics.custom_background, "#2B2B2B");
        assert_eq!(s.aesthetics.font, "Roboto-Thin");
        assert_eq!(s.aesthetics.color, "#FF0000");
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path("roundtrip");
        let mut store = SettingsStore::with_settings(Settings::default(), path.clone());
        store
            .apply_change(SECTION_AESTHETICS, KEY_BACKGROUND, "Midnight Blue")
            .unwrap();

        let reloaded = read_settings(&path).unwrap();
        assert_eq!(reloaded.aesthetics.background, "Midnight Blue");
        assert_eq!(reloaded.display.launch_mode, LaunchMode::Windowed);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_apply_change_notifies_observers() {
        let path = temp_path("notify");
        let mut store = SettingsStore::with_settings(Settings::default(), path.clone());
        let mut rx = store.subscribe();

        store
            .apply_change(SECTION_AESTHETICS, KEY_COLOR, "#00FF00")
            .unwrap();

        let change = rx.try_recv().unwrap();
        assert_eq!(change.section, SECTION_AESTHETICS);
        assert_eq!(change.key, KEY_COLOR);
        assert_eq!(change.value, "#00FF00");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_apply_change_rejects_unknown_key() {
        let path = temp_path("unknown");
        let mut store = SettingsStore::with_settings(Settings::default(), path.clone());
        assert!(store.apply_change("Display", "width", "1024").is_err());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_launch_mode_parse() {
        assert_eq!(LaunchMode::parse("windowed"), Some(LaunchMode::Windowed));
        assert_eq!(LaunchMode::parse("fullscreen"), Some(LaunchMode::Fullscreen));
        assert_eq!(LaunchMode::parse("borderless"), None);
    }

    #[test]
    fn test_invalid_launch_mode_rejected() {
        let path = temp_path("badmode");
        let mut store = SettingsStore::with_settings(Settings::default(), path.clone());
        assert!(store
            .apply_change(SECTION_DISPLAY, KEY_LAUNCH_MODE, "borderless")
            .is_err());
        fs::remove_file(&path).ok();
    }
}
