//! Numeric policy
//!
//! Every component rounds, snaps and compares numbers through this module so
//! that a template written by the classifier, adjusted by the slit corrector
//! and materialized by the evaluator agrees on a single precision.

/// Number of decimal digits kept in expression offsets, factors and
/// materialized coordinates.
pub const PRECISION_DIGITS: i32 = 5;

/// Distance under which a factor snaps to exactly 0, 1 or -1.
pub const SNAP_EPSILON: f64 = 1e-9;

/// Default length-matching tolerance for thickness detection.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Angles closer than this (radians) are treated as equal.
pub const ANGLE_EPSILON: f64 = 1e-4;

/// Default length under which cleanup drops a segment.
pub const DEFAULT_CLEANUP_THRESHOLD: f64 = 0.0001;

/// Round half away from zero to [`PRECISION_DIGITS`] decimals.
///
/// Negative zero is normalised to positive zero. Non-finite values pass
/// through unchanged.
pub fn round_to_precision(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(PRECISION_DIGITS);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Snap values within [`SNAP_EPSILON`] of 0, 1 or -1 to that exact value.
pub fn snap_unit(value: f64) -> f64 {
    for target in [0.0, 1.0, -1.0] {
        if (value - target).abs() < SNAP_EPSILON {
            return target;
        }
    }
    value
}

/// Round then snap: the canonical form of an expression component.
pub fn canonicalize(value: f64) -> f64 {
    snap_unit(round_to_precision(value))
}

/// Absolute-difference comparison.
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Format a literal number for path data.
///
/// Uses the shortest representation that parses back to the same value and
/// never an exponent, so the output is valid path data. `-0` prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}
