//! # LaserSVG Core
//!
//! Shared building blocks for the LaserSVG crates: the error taxonomy used
//! across path parsing, tagging and materialization, and the numeric policy
//! (precision, snapping, tolerances and number formatting) every component
//! applies uniformly.

pub mod error;
pub mod precision;
pub mod side;

pub use error::{Error, PathDataError, Result, TemplateError};

pub use precision::{
    approx_eq, canonicalize, format_number, round_to_precision, snap_unit, ANGLE_EPSILON,
    DEFAULT_CLEANUP_THRESHOLD, DEFAULT_TOLERANCE, PRECISION_DIGITS, SNAP_EPSILON,
};

pub use side::Side;
