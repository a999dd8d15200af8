//! Centralized configuration paths
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/preedit/`
//! - Windows: `%APPDATA%\preedit\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "preedit";

/// Base config directory
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/preedit`
///   - Else: `~/.config/preedit`
///
/// Windows:
///   - `%APPDATA%\preedit`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/preedit/input.yaml`
pub fn input_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("input.yaml"))
}

/// `~/.config/preedit/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    let logs = dir.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
