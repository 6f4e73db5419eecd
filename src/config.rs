//! Configuration file support for the album viewer.
//!
//! The viewer reads an optional JSON configuration at startup: from
//! localStorage in the browser, from a file for the replay tool. Missing
//! fields fall back to defaults, so an empty object `{"version": 1}` is a
//! valid configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MIN_SCALE, DEFAULT_ZOOM_STEP, element};
use crate::keybindings::KeyBindings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }

    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Wheel zoom tuning
    #[serde(default)]
    pub zoom: ZoomConfig,

    /// Ids of the page elements the viewer binds to
    #[serde(default)]
    pub elements: ElementIds,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindings,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Wheel zoom section of the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    /// Scale change per unit of wheel `deltaY`
    #[serde(default = "default_zoom_step")]
    pub step: f64,

    /// Zoom steps that would reach this scale or below are rejected
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
}

fn default_zoom_step() -> f64 {
    DEFAULT_ZOOM_STEP
}

fn default_min_scale() -> f64 {
    DEFAULT_MIN_SCALE
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            step: default_zoom_step(),
            min_scale: default_min_scale(),
        }
    }
}

/// Element id section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIds {
    #[serde(default = "default_container_id")]
    pub container: String,
    #[serde(default = "default_image_id")]
    pub image: String,
    #[serde(default = "default_page_id")]
    pub page: String,
}

fn default_container_id() -> String {
    element::CONTAINER_ID.to_string()
}

fn default_image_id() -> String {
    element::IMAGE_ID.to_string()
}

fn default_page_id() -> String {
    element::PAGE_ID.to_string()
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            container: default_container_id(),
            image: default_image_id(),
            page: default_page_id(),
        }
    }
}

impl ViewerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            zoom: ZoomConfig::default(),
            elements: ElementIds::default(),
            keybindings: KeyBindings::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ZoomConfig { step, min_scale } = self.zoom;
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "zoom step must be positive, got {step}"
            )));
        }
        if !(min_scale.is_finite() && min_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "minimum scale must be positive, got {min_scale}"
            )));
        }
        Ok(())
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "valbum-config.json"
    }

    /// Get the per-user config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("valbum").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("valbum")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_file(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Ignoring config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// LocalStorage key for WASM config lookup.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &str = "valbum-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Value outside its valid range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
