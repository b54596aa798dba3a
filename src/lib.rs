//! # lasersvg
//!
//! Thickness-parametric path templates for laser-cut designs.
//!
//! A drawing made for one sheet thickness stores the segments whose length
//! equals that thickness as expressions in `thickness`. The template can then
//! be evaluated for any other sheet without redrawing it.
//!
//! ## Architecture
//!
//! 1. **lasersvg-core** - Error types, numeric precision policy, slit sides
//! 2. **lasersvg-path** - Path data, expressions, tagging, slit correction,
//!    materialization, cleanup and reversal
//! 3. **lasersvg-settings** - Configuration files
//! 4. **lasersvg** - Command-line tool tying the crates together

use std::path::Path;

pub use lasersvg_core::{Error, PathDataError, Result, Side, TemplateError};
pub use lasersvg_path::{
    candidates, materialize, materialize_str, parse_contour, parse_template,
    remove_short_segments, reverse, tag_all, tag_selected, tag_slits, Candidate, CleanupReport,
    Contour, Expression, SegmentClassifier, SlitOptions, SlitOutcome, TagOptions, Template,
};
pub use lasersvg_settings::{default_config_path, Config, ConfigError, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for path data
/// - RUST_LOG environment variable support
/// - Targets and line numbers on every event
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Read slit input as a template.
///
/// Text without expressions is plain path data, absolute or relative, and
/// is lifted into a template. Anything else must already be a template.
pub fn parse_slit_input(text: &str) -> Result<Template> {
    if text.contains('{') {
        parse_template(text)
    } else {
        Ok(parse_contour(text)?.to_template())
    }
}

/// Load the configuration named on the command line, or the per-user file.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)?,
        None => match default_config_path() {
            Ok(path) => Config::load_or_default(&path)?,
            Err(err) => {
                tracing::debug!("{}; using defaults", err);
                Config::default()
            }
        },
    };
    Ok(config)
}
