//! Contour reversal

use crate::command::{CommandKind, Contour, PathCommand};
use crate::resolve::{resolve, ResolvedSegment, SegmentShape};
use lasersvg_core::TemplateError;
use lyon::geom::point;

/// Traverse a single-subpath contour in the opposite direction.
///
/// Smooth curves come out as their explicit forms and arcs flip their sweep
/// flag. A closed contour starts at the same point, draws the former closing
/// segment as an explicit line, and keeps its close command.
pub fn reverse(contour: &Contour) -> Result<Contour, TemplateError> {
    if let Some(index) = contour.second_subpath() {
        return Err(TemplateError::UnsupportedCommandKind { index, letter: 'm' });
    }
    if contour.is_empty() {
        return Ok(contour.clone());
    }

    let segments = resolve(contour);
    let closed = segments
        .last()
        .is_some_and(|segment| segment.kind == CommandKind::ClosePath);
    let start = segments
        .iter()
        .find(|segment| segment.kind == CommandKind::MoveTo)
        .map_or(point(0.0, 0.0), |segment| segment.end);
    let drawn: Vec<&ResolvedSegment> = segments
        .iter()
        .filter(|segment| segment.kind.is_drawable())
        .collect();
    let end = drawn.last().map_or(start, |segment| segment.end);

    let mut reversed = Contour::default();
    if closed {
        reversed.push(PathCommand::MoveTo {
            x: start.x,
            y: start.y,
        });
        let closing = end - start;
        if closing.length() > 0.0 {
            reversed.push(PathCommand::LineTo {
                x: closing.x,
                y: closing.y,
            });
        }
    } else {
        reversed.push(PathCommand::MoveTo { x: end.x, y: end.y });
    }

    for segment in drawn.into_iter().rev() {
        reversed.push(reverse_segment(segment));
    }
    if closed {
        reversed.push(PathCommand::ClosePath);
    }

    Ok(reversed)
}

fn reverse_segment(segment: &ResolvedSegment) -> PathCommand {
    let back = segment.start - segment.end;
    let from_end = |p: lyon::geom::Point<f64>| p - segment.end;

    match (segment.kind, segment.shape) {
        (CommandKind::HorizontalLine, _) => PathCommand::HorizontalLine { x: back.x },
        (CommandKind::VerticalLine, _) => PathCommand::VerticalLine { y: back.y },
        (_, SegmentShape::Cubic { ctrl1, ctrl2 }) => {
            let (c1, c2) = (from_end(ctrl2), from_end(ctrl1));
            PathCommand::CubicCurve {
                x1: c1.x,
                y1: c1.y,
                x2: c2.x,
                y2: c2.y,
                x: back.x,
                y: back.y,
            }
        }
        (_, SegmentShape::Quadratic { ctrl }) => {
            let c = from_end(ctrl);
            PathCommand::QuadraticCurve {
                x1: c.x,
                y1: c.y,
                x: back.x,
                y: back.y,
            }
        }
        (
            _,
            SegmentShape::Arc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
            },
        ) => PathCommand::EllipticalArc {
            rx,
            ry,
            rotation,
            large_arc,
            sweep: !sweep,
            x: back.x,
            y: back.y,
        },
        _ => PathCommand::LineTo {
            x: back.x,
            y: back.y,
        },
    }
}
