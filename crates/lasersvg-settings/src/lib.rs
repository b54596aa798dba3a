//! lasersvg Settings Crate
//!
//! Loads, validates and saves the material and engine options shared by the
//! command-line tools.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, CleanupSettings, Config, MaterialSettings, SlitSettings,
    TaggingSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
