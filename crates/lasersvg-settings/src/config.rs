//! Configuration for the lasersvg tools
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, stored by default in the platform config directory.
//!
//! Configuration is organized into sections:
//! - Material (sheet thickness the drawings were made for)
//! - Tagging (length-matching tolerance, h/v collapsing)
//! - Slits (parallel-outer assumption)
//! - Cleanup (short segment threshold)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use lasersvg_core::DEFAULT_CLEANUP_THRESHOLD;
use lasersvg_path::{SlitOptions, TagOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "lasersvg";
const CONFIG_FILE: &str = "config.toml";

/// Material settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSettings {
    /// Sheet thickness in drawing units
    pub thickness: f64,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self { thickness: 3.0 }
    }
}

/// Thickness tagging settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggingSettings {
    /// Largest accepted difference between a segment length and the thickness
    pub tolerance: f64,
    /// Write tagged axis-aligned lines as `h`/`v`
    pub collapse_axis_aligned: bool,
}

impl Default for TaggingSettings {
    fn default() -> Self {
        let options = TagOptions::default();
        Self {
            tolerance: options.tolerance,
            collapse_axis_aligned: options.collapse_axis_aligned,
        }
    }
}

/// Slit correction settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlitSettings {
    /// Keep wall lengths next to outer segments parallel to the base
    pub assume_parallel: bool,
}

/// Cleanup settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupSettings {
    /// Drawable commands at most this long are removed
    pub threshold: f64,
}

impl Default for CleanupSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CLEANUP_THRESHOLD,
        }
    }
}

/// Complete tool configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub material: MaterialSettings,
    pub tagging: TaggingSettings,
    pub slits: SlitSettings,
    pub cleanup: CleanupSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load config from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file; using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let out_of_range = |key: &str, value: f64| ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        };

        let thickness = self.material.thickness;
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(out_of_range("material.thickness", thickness));
        }

        let tolerance = self.tagging.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(out_of_range("tagging.tolerance", tolerance));
        }

        let threshold = self.cleanup.threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(out_of_range("cleanup.threshold", threshold));
        }

        Ok(())
    }

    pub fn tag_options(&self) -> TagOptions {
        TagOptions {
            tolerance: self.tagging.tolerance,
            collapse_axis_aligned: self.tagging.collapse_axis_aligned,
        }
    }

    pub fn slit_options(&self) -> SlitOptions {
        SlitOptions {
            assume_parallel: self.slits.assume_parallel,
            tolerance: self.tagging.tolerance,
        }
    }
}

/// `<config dir>/lasersvg/config.toml` for the current platform.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })
}
