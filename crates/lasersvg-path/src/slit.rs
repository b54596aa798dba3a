//! Slit corrector
//!
//! A slit is a base segment whose length equals the thickness, entered and
//! left through two wall segments, with an outer segment beyond each wall:
//!
//! ```text
//!   outer-left        outer-right
//!  ----------+       +-----------
//!            |       |
//!  wall-left |       | wall-right
//!            +-------+
//!              base
//! ```
//!
//! When the thickness changes, the base grows along its own direction. The
//! outer segments absorb that growth along the gap chord (from the start of
//! the left wall to the end of the right wall) so the slit stays centred and
//! the rest of the contour does not move. When the base is tilted against
//! the gap, the walls absorb the part of the growth that is perpendicular to
//! the base.
//!
//! Every correction is written as `offset + factor * thickness` with the
//! offset chosen so the template still evaluates to the drawn contour at the
//! thickness it was drawn at.

use crate::classifier::{SegmentClassifier, TagOptions};
use crate::command::{CommandKind, Contour, PathCommand, Template};
use crate::evaluator::materialize;
use crate::expression::Argument;
use crate::geometry::{line_angle_between, lines_parallel, vector_angle, DirectedSegment};
use crate::resolve::{resolve, ResolvedSegment};
use lasersvg_core::{round_to_precision, Side, TemplateError, ANGLE_EPSILON, DEFAULT_TOLERANCE};
use lyon::geom::Vector;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, warn};

/// Options for slit correction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlitOptions {
    /// Keep wall lengths when the outer segment on that side runs parallel
    /// to the base (or its direction is unknown).
    pub assume_parallel: bool,
    /// Length-matching tolerance for the base segment.
    pub tolerance: f64,
}

impl Default for SlitOptions {
    fn default() -> Self {
        Self {
            assume_parallel: false,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// The five segments around a base, in absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlitContext {
    pub index: usize,
    pub outer_left: Option<ResolvedSegment>,
    pub wall_left: Option<ResolvedSegment>,
    pub base: ResolvedSegment,
    pub wall_right: Option<ResolvedSegment>,
    pub outer_right: Option<ResolvedSegment>,
    /// From the start of the left wall to the end of the right wall.
    pub gap: Option<DirectedSegment>,
}

impl SlitContext {
    pub fn wall(&self, side: Side) -> Option<&ResolvedSegment> {
        match side {
            Side::Left => self.wall_left.as_ref(),
            Side::Right => self.wall_right.as_ref(),
        }
    }

    pub fn outer(&self, side: Side) -> Option<&ResolvedSegment> {
        match side {
            Side::Left => self.outer_left.as_ref(),
            Side::Right => self.outer_right.as_ref(),
        }
    }

    /// Angle between the base line and the gap line, in `[0, π/2]`.
    pub fn alpha(&self) -> Option<f64> {
        let gap = self.gap?;
        Some(line_angle_between(self.base.chord().angle(), gap.angle()))
    }

    /// The remaining angle of the right triangle formed by half the base,
    /// half the gap and a wall.
    pub fn beta(&self) -> Option<f64> {
        self.alpha().map(|alpha| FRAC_PI_2 - alpha)
    }

    /// Direction of the outer segment where it touches the slit.
    pub fn outer_tangent(&self, side: Side) -> Option<Vector<f64>> {
        let outer = self.outer(side)?;
        match side {
            Side::Left => outer.tangent_at(1.0),
            Side::Right => outer.tangent_at(0.0),
        }
    }
}

/// What one slit correction changed and what it could not do
#[derive(Debug, Clone, PartialEq)]
pub struct SlitReport {
    pub index: usize,
    /// Template indices that were rewritten.
    pub corrected: Vec<usize>,
    /// Skipped or failed sides.
    pub issues: Vec<TemplateError>,
}

impl SlitReport {
    fn new(index: usize) -> Self {
        Self {
            index,
            corrected: Vec::new(),
            issues: Vec::new(),
        }
    }

    fn issue(&mut self, err: TemplateError) {
        warn!(index = self.index, "{}", err);
        self.issues.push(err);
    }

    fn missing(&mut self, side: Side, reason: impl Into<String>) {
        self.issue(TemplateError::InsufficientContext {
            index: self.index,
            side,
            reason: reason.into(),
        });
    }
}

/// Corrects slits of one single-subpath contour drawn at a known thickness
#[derive(Debug, Clone)]
pub struct SlitCorrector {
    contour: Contour,
    segments: Vec<ResolvedSegment>,
    classifier: SegmentClassifier,
    options: SlitOptions,
}

impl SlitCorrector {
    pub fn new(
        contour: &Contour,
        thickness: f64,
        options: SlitOptions,
    ) -> Result<Self, TemplateError> {
        let classifier = SegmentClassifier::new(
            thickness,
            TagOptions {
                tolerance: options.tolerance,
                collapse_axis_aligned: false,
            },
        )?;
        if let Some(index) = contour.second_subpath() {
            return Err(TemplateError::UnsupportedCommandKind { index, letter: 'm' });
        }
        Ok(Self {
            contour: contour.clone(),
            segments: resolve(contour),
            classifier,
            options,
        })
    }

    pub fn thickness(&self) -> f64 {
        self.classifier.thickness()
    }

    pub fn context(&self, index: usize) -> Result<SlitContext, TemplateError> {
        let len = self.segments.len();
        let base = *self
            .segments
            .get(index)
            .ok_or_else(|| TemplateError::InsufficientContext {
                index,
                side: Side::Right,
                reason: format!("contour has only {} commands", len),
            })?;
        if !base.kind.is_drawable() {
            return Err(TemplateError::UnsupportedCommandKind {
                index,
                letter: base.kind.letter(),
            });
        }

        let left = (index >= 2).then(|| (self.segments[index - 2], self.segments[index - 1]));
        let right =
            (index + 2 < len).then(|| (self.segments[index + 2], self.segments[index + 1]));
        let gap = match (left, right) {
            (Some((_, wall_left)), Some((_, wall_right))) => {
                Some(DirectedSegment::new(wall_left.start, wall_right.end))
            }
            _ => None,
        };

        Ok(SlitContext {
            index,
            outer_left: left.map(|(outer, _)| outer),
            wall_left: left.map(|(_, wall)| wall),
            base,
            wall_right: right.map(|(_, wall)| wall),
            outer_right: right.map(|(outer, _)| outer),
            gap,
        })
    }

    /// Tag the base at `index` and adjust its walls.
    pub fn correct_walls(
        &self,
        template: &mut Template,
        index: usize,
    ) -> Result<SlitReport, TemplateError> {
        self.run(template, index, false)
    }

    /// Tag the base at `index`, adjust its walls and shift the outer
    /// segments.
    pub fn correct(
        &self,
        template: &mut Template,
        index: usize,
    ) -> Result<SlitReport, TemplateError> {
        self.run(template, index, true)
    }

    fn run(
        &self,
        template: &mut Template,
        index: usize,
        with_outers: bool,
    ) -> Result<SlitReport, TemplateError> {
        if template.len() != self.segments.len() {
            return Err(TemplateError::TemplateCorruption {
                index,
                text: String::new(),
                reason: format!(
                    "template has {} commands but the contour has {}",
                    template.len(),
                    self.segments.len()
                ),
            });
        }
        let ctx = self.context(index)?;
        let mut report = SlitReport::new(index);

        let base = &self.contour.commands()[index];
        if !self.classifier.matches(base) {
            return Err(TemplateError::NotThicknessSegment {
                index,
                length: base.length().unwrap_or_default(),
                thickness: self.thickness(),
            });
        }
        let tagged = self.classifier.tag_command(index, base)?;
        // A base shifted by a neighbouring slit differs from its own tag.
        if template.commands()[index] == tagged {
            return Err(TemplateError::AlreadyTagged { index });
        }
        template.commands_mut()[index] = tagged;
        report.corrected.push(index);

        for side in Side::BOTH {
            if ctx.wall(side).is_none() {
                let reason = match side {
                    Side::Left => "fewer than two commands before the base",
                    Side::Right => "fewer than two commands after the base",
                };
                report.missing(side, reason);
                continue;
            }
            self.correct_wall(template, &ctx, side, &mut report);
            if with_outers {
                self.correct_outer(template, &ctx, side, &mut report);
            }
        }

        debug!(index, corrected = ?report.corrected, "slit corrected");
        Ok(report)
    }

    fn correct_wall(
        &self,
        template: &mut Template,
        ctx: &SlitContext,
        side: Side,
        report: &mut SlitReport,
    ) {
        let Some(wall) = ctx.wall(side) else {
            return;
        };
        if !wall.kind.is_drawable() {
            report.missing(side, format!("wall is a '{}' command", wall.kind.letter()));
            return;
        }
        let Some(gap) = ctx.gap else {
            debug!(index = ctx.index, %side, "no gap chord; wall kept");
            return;
        };

        if self.options.assume_parallel {
            let parallel = ctx.outer_tangent(side).map_or(true, |tangent| {
                lines_parallel(vector_angle(tangent), ctx.base.chord().angle())
            });
            if parallel {
                debug!(index = ctx.index, %side, "outer segment parallel to base; wall kept");
                return;
            }
        }

        let Some(alpha) = ctx.alpha() else {
            return;
        };
        if alpha < ANGLE_EPSILON {
            debug!(index = ctx.index, %side, "gap parallel to base; wall kept");
            return;
        }
        let beta = FRAC_PI_2 - alpha;
        if beta.sin().abs() < ANGLE_EPSILON {
            report.missing(side, "gap is perpendicular to the base");
            return;
        }

        let (Some(b), Some(g), Some(w)) = (ctx.base.chord().unit(), gap.unit(), wall.chord().unit())
        else {
            report.missing(side, "degenerate slit geometry");
            return;
        };

        // Half of the base growth that the outer shift along the gap leaves
        // uncovered; it is perpendicular to the base.
        let c = g.dot(b);
        let v = g / (2.0 * c) - b / 2.0;
        let projection = v.dot(w);
        if projection.abs() < f64::EPSILON {
            return;
        }

        let m = (0.5 * alpha.sin() / beta.sin()).abs();
        let signed = m.copysign(projection);
        let dx = round_to_precision(signed * w.x);
        let dy = round_to_precision(signed * w.y);
        self.shift(template, wall.index, dx, dy, report);
    }

    fn correct_outer(
        &self,
        template: &mut Template,
        ctx: &SlitContext,
        side: Side,
        report: &mut SlitReport,
    ) {
        let Some(outer) = ctx.outer(side) else {
            return;
        };
        match outer.kind {
            CommandKind::ClosePath => {
                debug!(index = ctx.index, %side, "outer segment is a close-path; nothing to shift");
                return;
            }
            CommandKind::MoveTo => {
                report.missing(side, "outer segment is the initial move");
                return;
            }
            _ => {}
        }

        let Some(b) = ctx.base.chord().unit() else {
            return;
        };
        let reference = ctx.gap.and_then(|gap| gap.unit()).unwrap_or(b);
        let c = reference.dot(b);
        if c.abs() < ANGLE_EPSILON {
            report.missing(side, "gap is perpendicular to the base");
            return;
        }

        let f = -reference / (2.0 * c);
        let dx = round_to_precision(f.x);
        let dy = round_to_precision(f.y);
        self.shift(template, outer.index, dx, dy, report);
    }

    fn shift(&self, template: &mut Template, index: usize, dx: f64, dy: f64, report: &mut SlitReport) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let shifted = shift_endpoint(&template.commands()[index], dx, dy, self.thickness());
        debug!(index, command = %shifted, "endpoint follows thickness");
        template.commands_mut()[index] = shifted;
        report.corrected.push(index);
    }
}

/// Add `(dx, dy)` per unit of thickness to a command's endpoint, keeping its
/// value at `thickness`.
///
/// Horizontal and vertical lines become plain lines when the other axis
/// picks up a term.
fn shift_endpoint(
    command: &PathCommand<Argument>,
    dx: f64,
    dy: f64,
    thickness: f64,
) -> PathCommand<Argument> {
    let shift = |arg: &Argument, d: f64| -> Argument {
        if d == 0.0 {
            *arg
        } else {
            Argument::from(arg.as_expression().combine(-d * thickness, d))
        }
    };
    let zero = Argument::Literal(0.0);

    match command {
        PathCommand::HorizontalLine { x } if dy != 0.0 => PathCommand::LineTo {
            x: shift(x, dx),
            y: shift(&zero, dy),
        },
        PathCommand::VerticalLine { y } if dx != 0.0 => PathCommand::LineTo {
            x: shift(&zero, dx),
            y: shift(y, dy),
        },
        _ => {
            let mut shifted = command.clone();
            let (x, y) = shifted.endpoint_mut();
            if let Some(x) = x {
                *x = shift(x, dx);
            }
            if let Some(y) = y {
                *y = shift(y, dy);
            }
            shifted
        }
    }
}

/// Result of correcting several slits in one template
#[derive(Debug, Clone, PartialEq)]
pub struct SlitOutcome {
    pub template: Template,
    pub issues: Vec<TemplateError>,
}

/// Correct the slits at `indices` of a template drawn at `thickness`.
///
/// The geometry is read from the template materialized at `thickness`, so a
/// plain contour (see [`Contour::to_template`]) and a previously tagged
/// template are handled alike. A base that is already tagged is skipped, so
/// correcting a slit twice leaves it as it was. A slit that cannot be
/// corrected is reported and the others still proceed.
pub fn tag_slits(
    template: &Template,
    indices: &[usize],
    thickness: f64,
    options: SlitOptions,
) -> Result<SlitOutcome, TemplateError> {
    let contour = materialize(template, thickness)?;
    let corrector = SlitCorrector::new(&contour, thickness, options)?;

    let mut corrected = template.clone();
    let mut issues = Vec::new();
    for &index in indices {
        match corrector.correct(&mut corrected, index) {
            Ok(report) => issues.extend(report.issues),
            Err(err) => {
                warn!(index, "slit skipped: {}", err);
                issues.push(err);
            }
        }
    }

    Ok(SlitOutcome {
        template: corrected,
        issues,
    })
}
