//! Geometry primitives
//!
//! Directed segments and the angle helpers the slit corrector reasons with.
//! Points and vectors are `lyon::geom` types in `f64`.

use lasersvg_core::ANGLE_EPSILON;
use lyon::geom::{LineSegment, Point, Vector};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// A straight segment with a direction, in absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectedSegment {
    pub start: Point<f64>,
    pub end: Point<f64>,
}

impl DirectedSegment {
    pub fn new(start: Point<f64>, end: Point<f64>) -> Self {
        Self { start, end }
    }

    pub fn dx(&self) -> f64 {
        self.end.x - self.start.x
    }

    pub fn dy(&self) -> f64 {
        self.end.y - self.start.y
    }

    pub fn delta(&self) -> Vector<f64> {
        self.end - self.start
    }

    /// Direction angle in `(-π, π]`.
    pub fn angle(&self) -> f64 {
        vector_angle(self.delta())
    }

    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    /// Unit direction, `None` for a zero-length segment.
    pub fn unit(&self) -> Option<Vector<f64>> {
        unit(self.delta())
    }

    /// Intersection of the two supporting lines, `None` when parallel.
    pub fn intersect(&self, other: &DirectedSegment) -> Option<Point<f64>> {
        if self.unit().is_none() || other.unit().is_none() {
            return None;
        }
        let a = LineSegment {
            from: self.start,
            to: self.end,
        }
        .to_line();
        let b = LineSegment {
            from: other.start,
            to: other.end,
        }
        .to_line();
        a.intersection(&b)
    }
}

/// Angle of a vector in `(-π, π]`.
pub fn vector_angle(v: Vector<f64>) -> f64 {
    let angle = v.y.atan2(v.x);
    if angle <= -PI {
        PI
    } else {
        angle
    }
}

pub fn unit(v: Vector<f64>) -> Option<Vector<f64>> {
    let length = v.length();
    if length > f64::EPSILON {
        Some(v / length)
    } else {
        None
    }
}

/// Map an angle onto its representative in `(-π/2, π/2]`.
///
/// A direction and its reverse describe the same line, so slit geometry
/// compares lines through this representative.
pub fn reduce_half_plane(theta: f64) -> f64 {
    if theta <= -FRAC_PI_2 {
        theta + PI
    } else if theta > FRAC_PI_2 {
        theta - PI
    } else {
        theta
    }
}

/// Angle between two lines given by direction angles, in `[0, π/2]`.
pub fn line_angle_between(a: f64, b: f64) -> f64 {
    let alpha = (reduce_half_plane(a) - reduce_half_plane(b)).abs();
    if alpha > FRAC_PI_2 {
        PI - alpha
    } else {
        alpha
    }
}

pub fn lines_parallel(a: f64, b: f64) -> bool {
    line_angle_between(a, b) < ANGLE_EPSILON
}
