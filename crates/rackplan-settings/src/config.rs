//! Configuration management for RackPlan
//!
//! Configuration is organized into sections:
//! - Editor settings (grid, snapping, history, machinery)
//! - Validation thresholds (dock clearance, storage density)
//! - Alignment guide tolerances
//!
//! Files are JSON or TOML, chosen by extension. Every field has a default,
//! so partial files load.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use rackplan_core::{MachineryClass, SnapConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "rackplan";
const CONFIG_FILE_NAME: &str = "config.toml";

/// On-disk configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Editor preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Grid cell size in metres
    pub grid_size: f64,
    /// Show the grid on startup
    pub grid_visible: bool,
    /// Maximum number of undo snapshots
    pub max_history: usize,
    /// Material-handling machinery driving the aisle rule
    pub machinery: MachineryClass,
    pub snap: SnapConfig,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            grid_visible: true,
            max_history: 50,
            machinery: MachineryClass::default(),
            snap: SnapConfig::default(),
        }
    }
}

/// Validator thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Clear depth (metres) required in front of each dock
    pub dock_maneuver_depth: f64,
    /// Shelf-area ratio below which an info is raised
    pub low_density: f64,
    /// Shelf-area ratio above which a warning is raised
    pub high_density: f64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            dock_maneuver_depth: 4.0,
            low_density: 0.20,
            high_density: 0.60,
        }
    }
}

/// Alignment guide tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideSettings {
    /// Maximum distance (metres) at which edges are considered aligned
    pub threshold: f64,
    /// Guides of one kind closer than this are merged
    pub dedupe_tolerance: f64,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            dedupe_tolerance: 0.05,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub editor: EditorSettings,
    pub validation: ValidationSettings,
    pub guides: GuideSettings,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file path, e.g. `~/.config/rackplan/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })?;
        Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the default config file, falling back to defaults when it
    /// does not exist.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content, format)?;
        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str, format: ConfigFormat) -> SettingsResult<Self> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    pub fn render(&self, format: ConfigFormat) -> SettingsResult<String> {
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };
        Ok(content)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = self.render(ConfigFormat::from_path(path)?)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let editor = &self.editor;
        if !(editor.grid_size.is_finite() && editor.grid_size > 0.0) {
            return Err(ConfigError::out_of_range("editor.grid_size", editor.grid_size));
        }
        let distance = editor.snap.snap_distance;
        if !(distance.is_finite() && distance >= 0.0) {
            return Err(ConfigError::out_of_range("editor.snap.snap_distance", distance));
        }
        if editor.max_history == 0 {
            return Err(ConfigError::out_of_range("editor.max_history", 0));
        }

        let validation = &self.validation;
        if !(validation.dock_maneuver_depth.is_finite() && validation.dock_maneuver_depth >= 0.0) {
            return Err(ConfigError::out_of_range(
                "validation.dock_maneuver_depth",
                validation.dock_maneuver_depth,
            ));
        }
        for (key, value) in [
            ("validation.low_density", validation.low_density),
            ("validation.high_density", validation.high_density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::out_of_range(key, value));
            }
        }
        if validation.low_density >= validation.high_density {
            return Err(ConfigError::Inconsistent(format!(
                "low_density ({}) must be below high_density ({})",
                validation.low_density, validation.high_density
            )));
        }

        if !(self.guides.threshold.is_finite() && self.guides.threshold > 0.0) {
            return Err(ConfigError::out_of_range("guides.threshold", self.guides.threshold));
        }
        if !(self.guides.dedupe_tolerance.is_finite() && self.guides.dedupe_tolerance >= 0.0) {
            return Err(ConfigError::out_of_range(
                "guides.dedupe_tolerance",
                self.guides.dedupe_tolerance,
            ));
        }

        Ok(())
    }
}
