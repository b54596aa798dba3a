//! Absolute geometry of a relative contour
//!
//! Walks the commands once, tracking the current point, the subpath start
//! and the last control point, and reports every command as an absolute
//! segment.

use crate::command::{CommandKind, Contour, PathCommand};
use crate::geometry::{unit, DirectedSegment};
use lyon::geom::{point, vector, CubicBezierSegment, Point, QuadraticBezierSegment, Vector};
use serde::{Deserialize, Serialize};

/// Geometry carried by a resolved segment beyond its endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SegmentShape {
    Move,
    Line,
    Cubic {
        ctrl1: Point<f64>,
        ctrl2: Point<f64>,
    },
    Quadratic {
        ctrl: Point<f64>,
    },
    Arc {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
    },
    Close,
}

/// One command in absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSegment {
    pub index: usize,
    pub kind: CommandKind,
    pub start: Point<f64>,
    pub end: Point<f64>,
    pub shape: SegmentShape,
}

impl ResolvedSegment {
    pub fn chord(&self) -> DirectedSegment {
        DirectedSegment::new(self.start, self.end)
    }

    pub fn length(&self) -> f64 {
        self.chord().length()
    }

    /// Direction of travel at parameter `t` in `[0, 1]`.
    ///
    /// Curves use their derivative, falling back to the chord where a
    /// control point coincides with the endpoint. Arcs and moves have no
    /// usable tangent here.
    pub fn tangent_at(&self, t: f64) -> Option<Vector<f64>> {
        let derivative = match self.shape {
            SegmentShape::Line | SegmentShape::Close => return unit(self.end - self.start),
            SegmentShape::Move | SegmentShape::Arc { .. } => return None,
            SegmentShape::Cubic { ctrl1, ctrl2 } => CubicBezierSegment {
                from: self.start,
                ctrl1,
                ctrl2,
                to: self.end,
            }
            .derivative(t),
            SegmentShape::Quadratic { ctrl } => QuadraticBezierSegment {
                from: self.start,
                ctrl,
                to: self.end,
            }
            .derivative(t),
        };
        unit(derivative).or_else(|| unit(self.end - self.start))
    }
}

/// Resolve every command of a relative contour to absolute coordinates.
///
/// The first move is taken relative to the origin. Smooth curves reflect
/// the previous control point when the previous command belongs to the same
/// curve family, and use the current point otherwise.
pub fn resolve(contour: &Contour) -> Vec<ResolvedSegment> {
    let mut segments = Vec::with_capacity(contour.len());
    let mut current = point(0.0, 0.0);
    let mut subpath_start = current;
    let mut previous = SegmentShape::Move;

    for (index, command) in contour.iter().enumerate() {
        let start = current;
        let offset = |dx: f64, dy: f64| start + vector(dx, dy);

        let (end, shape) = match *command {
            PathCommand::MoveTo { x, y } => {
                let end = offset(x, y);
                subpath_start = end;
                (end, SegmentShape::Move)
            }
            PathCommand::LineTo { x, y } => (offset(x, y), SegmentShape::Line),
            PathCommand::HorizontalLine { x } => (offset(x, 0.0), SegmentShape::Line),
            PathCommand::VerticalLine { y } => (offset(0.0, y), SegmentShape::Line),
            PathCommand::CubicCurve {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => (
                offset(x, y),
                SegmentShape::Cubic {
                    ctrl1: offset(x1, y1),
                    ctrl2: offset(x2, y2),
                },
            ),
            PathCommand::SmoothCubicCurve { x2, y2, x, y } => {
                let ctrl1 = match previous {
                    SegmentShape::Cubic { ctrl2, .. } => reflect(ctrl2, start),
                    _ => start,
                };
                (
                    offset(x, y),
                    SegmentShape::Cubic {
                        ctrl1,
                        ctrl2: offset(x2, y2),
                    },
                )
            }
            PathCommand::QuadraticCurve { x1, y1, x, y } => (
                offset(x, y),
                SegmentShape::Quadratic {
                    ctrl: offset(x1, y1),
                },
            ),
            PathCommand::SmoothQuadraticCurve { x, y } => {
                let ctrl = match previous {
                    SegmentShape::Quadratic { ctrl } => reflect(ctrl, start),
                    _ => start,
                };
                (offset(x, y), SegmentShape::Quadratic { ctrl })
            }
            PathCommand::EllipticalArc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => (
                offset(x, y),
                SegmentShape::Arc {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                },
            ),
            PathCommand::ClosePath => (subpath_start, SegmentShape::Close),
        };

        segments.push(ResolvedSegment {
            index,
            kind: command.kind(),
            start,
            end,
            shape,
        });
        current = end;
        previous = shape;
    }

    segments
}

fn reflect(ctrl: Point<f64>, about: Point<f64>) -> Point<f64> {
    about + (about - ctrl)
}
