//! Segment classifier
//!
//! Finds commands whose length matches the material thickness and rewrites
//! their endpoint arguments as multiples of `thickness`.

use crate::command::{CommandKind, Contour, PathCommand, Template};
use crate::expression::{Argument, Expression};
use crate::resolve::resolve;
use lasersvg_core::{approx_eq, TemplateError, DEFAULT_TOLERANCE};
use lyon::geom::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Options for length matching and tagging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagOptions {
    /// A command matches when `|length - thickness| <= tolerance`.
    pub tolerance: f64,
    /// Rewrite a tagged line whose other axis is zero as `h`/`v`.
    pub collapse_axis_aligned: bool,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            collapse_axis_aligned: false,
        }
    }
}

/// A command whose length matches the thickness
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub index: usize,
    pub letter: char,
    pub start: Point<f64>,
    pub end: Point<f64>,
    pub length: f64,
    /// Set for indices below 2, which have no left context for slit
    /// correction.
    pub early: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentClassifier {
    thickness: f64,
    options: TagOptions,
}

impl SegmentClassifier {
    pub fn new(thickness: f64, options: TagOptions) -> Result<Self, TemplateError> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(TemplateError::InvalidThickness { value: thickness });
        }
        Ok(Self { thickness, options })
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn options(&self) -> TagOptions {
        self.options
    }

    /// Whether a taggable command's length matches the thickness.
    ///
    /// Arcs are never matched since their endpoint cannot be tagged.
    pub fn matches(&self, command: &PathCommand) -> bool {
        let kind = command.kind();
        kind.is_drawable()
            && kind != CommandKind::EllipticalArc
            && command
                .length()
                .is_some_and(|length| approx_eq(length, self.thickness, self.options.tolerance))
    }

    /// Rewrite the endpoint of one command in terms of the thickness.
    ///
    /// Control points and arc parameters stay literal. Moves, close-paths
    /// and arcs have no tagging rule.
    pub fn tag_command(
        &self,
        index: usize,
        command: &PathCommand,
    ) -> Result<PathCommand<Argument>, TemplateError> {
        let ratio = |v: f64| -> Result<Argument, TemplateError> {
            Ok(Argument::from(Expression::from_ratio(v, self.thickness)?))
        };

        let tagged = match *command {
            PathCommand::LineTo { x, y } => {
                let (x, y) = (ratio(x)?, ratio(y)?);
                match (x, y) {
                    (x, Argument::Literal(y)) if self.options.collapse_axis_aligned
                        && y == 0.0
                        && x.is_parametric() =>
                    {
                        PathCommand::HorizontalLine { x }
                    }
                    (Argument::Literal(x), y)
                        if self.options.collapse_axis_aligned && x == 0.0 && y.is_parametric() =>
                    {
                        PathCommand::VerticalLine { y }
                    }
                    (x, y) => PathCommand::LineTo { x, y },
                }
            }
            PathCommand::HorizontalLine { x } => PathCommand::HorizontalLine { x: ratio(x)? },
            PathCommand::VerticalLine { y } => PathCommand::VerticalLine { y: ratio(y)? },
            PathCommand::CubicCurve { .. }
            | PathCommand::SmoothCubicCurve { .. }
            | PathCommand::QuadraticCurve { .. }
            | PathCommand::SmoothQuadraticCurve { .. } => {
                let mut tagged = command.to_template();
                if let Some((dx, dy)) = command.delta() {
                    let (x, y) = tagged.endpoint_mut();
                    if let Some(x) = x {
                        *x = ratio(dx)?;
                    }
                    if let Some(y) = y {
                        *y = ratio(dy)?;
                    }
                }
                tagged
            }
            PathCommand::MoveTo { .. }
            | PathCommand::EllipticalArc { .. }
            | PathCommand::ClosePath => {
                return Err(TemplateError::UnsupportedCommandKind {
                    index,
                    letter: command.letter(),
                })
            }
        };
        Ok(tagged)
    }

    /// Tag every command whose length matches the thickness.
    pub fn tag_all(&self, contour: &Contour) -> Template {
        contour
            .iter()
            .enumerate()
            .map(|(index, command)| {
                if !self.matches(command) {
                    return command.to_template();
                }
                match self.tag_command(index, command) {
                    Ok(tagged) => {
                        debug!(index, command = %tagged, "tagged thickness segment");
                        tagged
                    }
                    Err(err) => {
                        warn!(index, "{}; left unchanged", err);
                        command.to_template()
                    }
                }
            })
            .collect()
    }

    /// Tag the selected commands whose length matches the thickness.
    ///
    /// Out-of-range indices, commands of another length and commands
    /// without a tagging rule are reported and left literal.
    pub fn tag_selected(&self, contour: &Contour, indices: &[usize]) -> Template {
        let mut template = contour.to_template();
        for &index in indices {
            let Some(command) = contour.get(index) else {
                warn!(index, len = contour.len(), "selected index is out of range");
                continue;
            };
            let kind = command.kind();
            if kind.is_drawable() && kind != CommandKind::EllipticalArc && !self.matches(command) {
                warn!(
                    index,
                    length = command.length().unwrap_or_default(),
                    thickness = self.thickness,
                    "selected segment does not match the thickness; left unchanged"
                );
                continue;
            }
            match self.tag_command(index, command) {
                Ok(tagged) => template.commands_mut()[index] = tagged,
                Err(err) => warn!(index, "{}; left unchanged", err),
            }
        }
        template
    }

    /// Every drawable command matching the thickness, in absolute terms.
    pub fn candidates(&self, contour: &Contour) -> Vec<Candidate> {
        resolve(contour)
            .into_iter()
            .zip(contour.iter())
            .filter(|(_, command)| self.matches(command))
            .map(|(segment, command)| {
                let early = segment.index < 2;
                if early {
                    warn!(
                        index = segment.index,
                        "candidate has no left context for slit correction"
                    );
                }
                Candidate {
                    index: segment.index,
                    letter: command.letter(),
                    start: segment.start,
                    end: segment.end,
                    length: command.length().unwrap_or_default(),
                    early,
                }
            })
            .collect()
    }
}

/// Tag every command of `contour` whose length is within `tolerance` of
/// `target_length`.
pub fn tag_all(
    contour: &Contour,
    target_length: f64,
    tolerance: f64,
) -> Result<Template, TemplateError> {
    let options = TagOptions {
        tolerance,
        ..TagOptions::default()
    };
    Ok(SegmentClassifier::new(target_length, options)?.tag_all(contour))
}

/// Tag the commands at `indices` against `target_length`.
pub fn tag_selected(
    contour: &Contour,
    indices: &[usize],
    target_length: f64,
) -> Result<Template, TemplateError> {
    Ok(SegmentClassifier::new(target_length, TagOptions::default())?
        .tag_selected(contour, indices))
}

/// Thickness-matching commands of `contour`.
pub fn candidates(
    contour: &Contour,
    thickness: f64,
    tolerance: f64,
) -> Result<Vec<Candidate>, TemplateError> {
    let options = TagOptions {
        tolerance,
        ..TagOptions::default()
    };
    Ok(SegmentClassifier::new(thickness, options)?.candidates(contour))
}
