use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Studio preferences. The gradient itself is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where `export` writes files; `None` means [`default_export_dir`].
    pub export_dir: Option<PathBuf>,
    /// Open the studio with the control panel collapsed.
    pub start_collapsed: bool,
}

impl Settings {
    /// The configured export directory, or the default one.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(default_export_dir)
    }
}

/// Base directory: ~/.config/gradient-studio/
pub fn base_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gradient-studio")
}

pub fn settings_path() -> PathBuf {
    base_dir().join("settings.json")
}

pub fn log_path() -> PathBuf {
    base_dir().join("studio.log")
}

pub fn default_export_dir() -> PathBuf {
    base_dir().join("exports")
}

pub fn load() -> Settings {
    load_from(&settings_path())
}

/// Read settings from `path`. A missing file yields defaults silently; an
/// unreadable or malformed one yields defaults with a warning.
pub fn load_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let parsed = fs::read_to_string(path)
        .context("Failed to read settings")
        .and_then(|s| serde_json::from_str(&s).context("Failed to parse settings"));
    match parsed {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{}: {e:#}, using defaults", path.display());
            Settings::default()
        }
    }
}

pub fn save(settings: &Settings) -> Result<()> {
    save_to(settings, &settings_path())
}

pub fn save_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
