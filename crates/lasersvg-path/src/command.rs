//! Path command model
//!
//! A closed tagged variant over the SVG path commands, generic over the
//! argument type so the same shape describes both literal contours
//! (`PathCommand<f64>`) and thickness templates (`PathCommand<Argument>`).
//! Every argument is stored in relative form.

use crate::expression::Argument;
use lasersvg_core::format_number;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;

/// The ten path command kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalLine,
    VerticalLine,
    CubicCurve,
    SmoothCubicCurve,
    QuadraticCurve,
    SmoothQuadraticCurve,
    EllipticalArc,
    ClosePath,
}

impl CommandKind {
    /// Map a command letter to its kind and whether it is absolute.
    pub fn from_letter(letter: char) -> Option<(Self, bool)> {
        let kind = match letter.to_ascii_lowercase() {
            'm' => Self::MoveTo,
            'l' => Self::LineTo,
            'h' => Self::HorizontalLine,
            'v' => Self::VerticalLine,
            'c' => Self::CubicCurve,
            's' => Self::SmoothCubicCurve,
            'q' => Self::QuadraticCurve,
            't' => Self::SmoothQuadraticCurve,
            'a' => Self::EllipticalArc,
            'z' => Self::ClosePath,
            _ => return None,
        };
        Some((kind, letter.is_ascii_uppercase()))
    }

    /// Relative (lowercase) command letter.
    pub fn letter(self) -> char {
        match self {
            Self::MoveTo => 'm',
            Self::LineTo => 'l',
            Self::HorizontalLine => 'h',
            Self::VerticalLine => 'v',
            Self::CubicCurve => 'c',
            Self::SmoothCubicCurve => 's',
            Self::QuadraticCurve => 'q',
            Self::SmoothQuadraticCurve => 't',
            Self::EllipticalArc => 'a',
            Self::ClosePath => 'z',
        }
    }

    /// Number of arguments, arc flags included.
    pub fn arity(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo | Self::SmoothQuadraticCurve => 2,
            Self::HorizontalLine | Self::VerticalLine => 1,
            Self::CubicCurve => 6,
            Self::SmoothCubicCurve | Self::QuadraticCurve => 4,
            Self::EllipticalArc => 7,
            Self::ClosePath => 0,
        }
    }

    /// Whether the command draws a segment with explicit geometry.
    pub fn is_drawable(self) -> bool {
        !matches!(self, Self::MoveTo | Self::ClosePath)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single path command in relative form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathCommand<A = f64> {
    MoveTo {
        x: A,
        y: A,
    },
    LineTo {
        x: A,
        y: A,
    },
    HorizontalLine {
        x: A,
    },
    VerticalLine {
        y: A,
    },
    CubicCurve {
        x1: A,
        y1: A,
        x2: A,
        y2: A,
        x: A,
        y: A,
    },
    SmoothCubicCurve {
        x2: A,
        y2: A,
        x: A,
        y: A,
    },
    QuadraticCurve {
        x1: A,
        y1: A,
        x: A,
        y: A,
    },
    SmoothQuadraticCurve {
        x: A,
        y: A,
    },
    EllipticalArc {
        rx: A,
        ry: A,
        rotation: A,
        large_arc: bool,
        sweep: bool,
        x: A,
        y: A,
    },
    ClosePath,
}

impl<A> PathCommand<A> {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::MoveTo { .. } => CommandKind::MoveTo,
            Self::LineTo { .. } => CommandKind::LineTo,
            Self::HorizontalLine { .. } => CommandKind::HorizontalLine,
            Self::VerticalLine { .. } => CommandKind::VerticalLine,
            Self::CubicCurve { .. } => CommandKind::CubicCurve,
            Self::SmoothCubicCurve { .. } => CommandKind::SmoothCubicCurve,
            Self::QuadraticCurve { .. } => CommandKind::QuadraticCurve,
            Self::SmoothQuadraticCurve { .. } => CommandKind::SmoothQuadraticCurve,
            Self::EllipticalArc { .. } => CommandKind::EllipticalArc,
            Self::ClosePath => CommandKind::ClosePath,
        }
    }

    pub fn letter(&self) -> char {
        self.kind().letter()
    }

    /// Mutable access to the endpoint arguments `(x, y)`.
    ///
    /// Horizontal and vertical lines expose only the axis they carry;
    /// close-path has no endpoint arguments.
    pub fn endpoint_mut(&mut self) -> (Option<&mut A>, Option<&mut A>) {
        match self {
            Self::MoveTo { x, y }
            | Self::LineTo { x, y }
            | Self::CubicCurve { x, y, .. }
            | Self::SmoothCubicCurve { x, y, .. }
            | Self::QuadraticCurve { x, y, .. }
            | Self::SmoothQuadraticCurve { x, y }
            | Self::EllipticalArc { x, y, .. } => (Some(x), Some(y)),
            Self::HorizontalLine { x } => (Some(x), None),
            Self::VerticalLine { y } => (None, Some(y)),
            Self::ClosePath => (None, None),
        }
    }

    /// Convert every argument, stopping at the first failure.
    pub fn try_map<B, E>(
        &self,
        mut f: impl FnMut(&A) -> Result<B, E>,
    ) -> Result<PathCommand<B>, E> {
        Ok(match self {
            Self::MoveTo { x, y } => PathCommand::MoveTo { x: f(x)?, y: f(y)? },
            Self::LineTo { x, y } => PathCommand::LineTo { x: f(x)?, y: f(y)? },
            Self::HorizontalLine { x } => PathCommand::HorizontalLine { x: f(x)? },
            Self::VerticalLine { y } => PathCommand::VerticalLine { y: f(y)? },
            Self::CubicCurve {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => PathCommand::CubicCurve {
                x1: f(x1)?,
                y1: f(y1)?,
                x2: f(x2)?,
                y2: f(y2)?,
                x: f(x)?,
                y: f(y)?,
            },
            Self::SmoothCubicCurve { x2, y2, x, y } => PathCommand::SmoothCubicCurve {
                x2: f(x2)?,
                y2: f(y2)?,
                x: f(x)?,
                y: f(y)?,
            },
            Self::QuadraticCurve { x1, y1, x, y } => PathCommand::QuadraticCurve {
                x1: f(x1)?,
                y1: f(y1)?,
                x: f(x)?,
                y: f(y)?,
            },
            Self::SmoothQuadraticCurve { x, y } => {
                PathCommand::SmoothQuadraticCurve { x: f(x)?, y: f(y)? }
            }
            Self::EllipticalArc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => PathCommand::EllipticalArc {
                rx: f(rx)?,
                ry: f(ry)?,
                rotation: f(rotation)?,
                large_arc: *large_arc,
                sweep: *sweep,
                x: f(x)?,
                y: f(y)?,
            },
            Self::ClosePath => PathCommand::ClosePath,
        })
    }

    /// Convert every argument.
    pub fn map<B>(&self, mut f: impl FnMut(&A) -> B) -> PathCommand<B> {
        match self.try_map(|arg| Ok::<B, Infallible>(f(arg))) {
            Ok(command) => command,
            Err(never) => match never {},
        }
    }
}

impl<A: PathArg> PathCommand<A> {
    /// Arguments rendered in path-data order, arc flags as `0`/`1`.
    pub fn formatted_args(&self) -> Vec<String> {
        let flag = |b: &bool| if *b { "1".to_string() } else { "0".to_string() };
        match self {
            Self::MoveTo { x, y }
            | Self::LineTo { x, y }
            | Self::SmoothQuadraticCurve { x, y } => vec![x.fmt_arg(), y.fmt_arg()],
            Self::HorizontalLine { x } => vec![x.fmt_arg()],
            Self::VerticalLine { y } => vec![y.fmt_arg()],
            Self::CubicCurve {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => vec![
                x1.fmt_arg(),
                y1.fmt_arg(),
                x2.fmt_arg(),
                y2.fmt_arg(),
                x.fmt_arg(),
                y.fmt_arg(),
            ],
            Self::SmoothCubicCurve { x2, y2, x, y } => {
                vec![x2.fmt_arg(), y2.fmt_arg(), x.fmt_arg(), y.fmt_arg()]
            }
            Self::QuadraticCurve { x1, y1, x, y } => {
                vec![x1.fmt_arg(), y1.fmt_arg(), x.fmt_arg(), y.fmt_arg()]
            }
            Self::EllipticalArc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => vec![
                rx.fmt_arg(),
                ry.fmt_arg(),
                rotation.fmt_arg(),
                flag(large_arc),
                flag(sweep),
                x.fmt_arg(),
                y.fmt_arg(),
            ],
            Self::ClosePath => Vec::new(),
        }
    }
}

impl PathCommand<f64> {
    /// Net endpoint displacement; `None` for close-path.
    pub fn delta(&self) -> Option<(f64, f64)> {
        match *self {
            Self::MoveTo { x, y }
            | Self::LineTo { x, y }
            | Self::CubicCurve { x, y, .. }
            | Self::SmoothCubicCurve { x, y, .. }
            | Self::QuadraticCurve { x, y, .. }
            | Self::SmoothQuadraticCurve { x, y }
            | Self::EllipticalArc { x, y, .. } => Some((x, y)),
            Self::HorizontalLine { x } => Some((x, 0.0)),
            Self::VerticalLine { y } => Some((0.0, y)),
            Self::ClosePath => None,
        }
    }

    /// Length of the endpoint displacement.
    pub fn length(&self) -> Option<f64> {
        self.delta().map(|(dx, dy)| dx.hypot(dy))
    }

    /// Lift into a template command holding only literals.
    pub fn to_template(&self) -> PathCommand<Argument> {
        self.map(|v| Argument::Literal(*v))
    }
}

impl<A: PathArg> fmt::Display for PathCommand<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.formatted_args();
        if args.is_empty() {
            write!(f, "{}", self.letter())
        } else {
            write!(f, "{} {}", self.letter(), args.join(","))
        }
    }
}

/// An argument type that can be written into path data
pub trait PathArg {
    fn fmt_arg(&self) -> String;
}

impl PathArg for f64 {
    fn fmt_arg(&self) -> String {
        format_number(*self)
    }
}

impl PathArg for Argument {
    fn fmt_arg(&self) -> String {
        self.to_string()
    }
}

/// One contour: an ordered command sequence in relative form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contour<A = f64> {
    commands: Vec<PathCommand<A>>,
}

/// A contour whose arguments may be thickness expressions
pub type Template = Contour<Argument>;

impl<A> Default for Contour<A> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<A> Contour<A> {
    pub fn new(commands: Vec<PathCommand<A>>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand<A>] {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut [PathCommand<A>] {
        &mut self.commands
    }

    pub fn into_commands(self) -> Vec<PathCommand<A>> {
        self.commands
    }

    pub fn get(&self, index: usize) -> Option<&PathCommand<A>> {
        self.commands.get(index)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn push(&mut self, command: PathCommand<A>) {
        self.commands.push(command);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathCommand<A>> {
        self.commands.iter()
    }

    /// Index of the second move command, if the contour has several subpaths.
    pub fn second_subpath(&self) -> Option<usize> {
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind() == CommandKind::MoveTo)
            .nth(1)
            .map(|(i, _)| i)
    }
}

impl Contour<f64> {
    pub fn to_template(&self) -> Template {
        Contour::new(self.commands.iter().map(PathCommand::to_template).collect())
    }
}

impl<'a, A> IntoIterator for &'a Contour<A> {
    type Item = &'a PathCommand<A>;
    type IntoIter = std::slice::Iter<'a, PathCommand<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl<A> FromIterator<PathCommand<A>> for Contour<A> {
    fn from_iter<I: IntoIterator<Item = PathCommand<A>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<A: PathArg> fmt::Display for Contour<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}
