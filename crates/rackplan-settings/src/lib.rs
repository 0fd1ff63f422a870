//! RackPlan Settings Crate
//!
//! Handles editor configuration: defaults, TOML/JSON persistence and
//! validation of the values the layout editor is built from.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, EditorSettings, GuideSettings, ValidationSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
