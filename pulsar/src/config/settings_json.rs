use std::fs;
use std::path::{Path, PathBuf};

use pulsar_core::Settings;

use super::error::{ConfigError, Result};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub fn settings_path(home: &Path) -> PathBuf {
    home.join(SETTINGS_FILE_NAME)
}

/// Load settings from `path`. A missing or empty file yields defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content =
        fs::read_to_string(path).map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let parsed: Settings = serde_json::from_str(content)?;
    Ok(parsed.normalized())
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(parent.to_path_buf(), e))?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content).map_err(|e| ConfigError::FileWrite(path.to_path_buf(), e))?;
    Ok(())
}
