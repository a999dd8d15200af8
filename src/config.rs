//! Input configuration persistence
//!
//! Stores input tuning in `~/.config/preedit/input.yaml`. Platform quirks are
//! resolved here once, so the rest of the crate has no conditional compilation.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Platform family whose input conventions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Windows,
    Mac,
    X11,
    Android,
}

impl Platform {
    /// Platform the crate was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Mac
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::X11
        }
    }

    /// Option/alt produces special characters instead of acting as a modifier
    pub fn alt_composes_characters(self) -> bool {
        self == Platform::Mac
    }

    /// Korean input methods there report the caret after the syllable being composed
    pub fn hangul_caret_step_back(self) -> bool {
        self != Platform::Windows
    }

    /// Whether a primary selection clipboard exists
    pub fn has_selection_clipboard(self) -> bool {
        self == Platform::X11
    }

    /// Input methods there mark the conversion target with a near-black underline
    pub fn dark_underline_is_target(self) -> bool {
        self == Platform::Mac
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// Errors loading or saving the input configuration
#[derive(Debug)]
pub enum ConfigError {
    /// No config directory could be determined
    NoConfigDir,
    Io(std::io::Error),
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoConfigDir => write!(f, "no config directory available"),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Parse(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoConfigDir => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}

/// Input tuning that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub platform: Platform,
    /// Touches released sooner than this are taps
    pub tap_threshold_ms: u64,
    /// Hold time before a touch opens the context menu
    pub long_press_ms: u64,
    pub double_click_ms: u64,
    /// Pointer travel before a press becomes a drag
    pub drag_threshold_px: f64,
    /// Allow carets past the end of a line
    pub virtual_space: bool,
    pub use_tabs: bool,
    pub tab_width: usize,
    /// Overrides the platform default
    pub hangul_caret_step_back: Option<bool>,
    /// Overrides the platform default
    pub selection_clipboard: Option<bool>,
    pub multiple_selection: bool,
    pub context_menu: bool,
    pub caret_width: u32,
    pub max_document_length: Option<usize>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            tap_threshold_ms: 100,
            long_press_ms: 300,
            double_click_ms: 300,
            drag_threshold_px: 4.0,
            virtual_space: false,
            use_tabs: false,
            tab_width: 4,
            hangul_caret_step_back: None,
            selection_clipboard: None,
            multiple_selection: true,
            context_menu: true,
            caret_width: 1,
            max_document_length: None,
        }
    }
}

impl InputConfig {
    /// Defaults for a given platform
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    pub fn hangul_step_back(&self) -> bool {
        self.hangul_caret_step_back
            .unwrap_or_else(|| self.platform.hangul_caret_step_back())
    }

    pub fn selection_clipboard_enabled(&self) -> bool {
        self.selection_clipboard
            .unwrap_or_else(|| self.platform.has_selection_clipboard())
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::input_config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::input_config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
