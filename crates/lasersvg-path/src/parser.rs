//! Path data parsing
//!
//! Splits path data into command letters, numbers and brace-delimited
//! expressions, then groups arguments into commands. Literal contours may
//! mix absolute and relative commands and come out fully relative;
//! templates must already be relative.

use crate::command::{CommandKind, Contour, PathCommand, Template};
use crate::expression::{Argument, Expression};
use lasersvg_core::{Error, PathDataError, Result, TemplateError};
use lyon::geom::{point, Point};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Command(char),
    Number(&'a str),
    Expression(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Spanned<'a> {
    token: Token<'a>,
    position: usize,
}

fn flush<'a>(
    path_data: &'a str,
    tokens: &mut Vec<Spanned<'a>>,
    current: &mut Option<usize>,
    end: usize,
) {
    if let Some(start) = current.take() {
        tokens.push(Spanned {
            token: Token::Number(&path_data[start..end]),
            position: start,
        });
    }
}

fn tokenize(path_data: &str) -> std::result::Result<Vec<Spanned<'_>>, PathDataError> {
    let mut tokens = Vec::new();
    let mut current: Option<usize> = None;
    let mut chars = path_data.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        match ch {
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q'
            | 'T' | 't' | 'A' | 'a' | 'Z' | 'z' => {
                flush(path_data, &mut tokens, &mut current, i);
                tokens.push(Spanned {
                    token: Token::Command(ch),
                    position: i,
                });
            }
            ' ' | ',' | '\n' | '\r' | '\t' => flush(path_data, &mut tokens, &mut current, i),
            '{' => {
                flush(path_data, &mut tokens, &mut current, i);
                let close = path_data[i..].find('}').map(|off| i + off).ok_or_else(|| {
                    PathDataError::UnexpectedToken {
                        position: i,
                        token: path_data[i..].to_string(),
                    }
                })?;
                tokens.push(Spanned {
                    token: Token::Expression(&path_data[i..=close]),
                    position: i,
                });
                while chars.peek().is_some_and(|&(j, _)| j <= close) {
                    chars.next();
                }
            }
            '}' => {
                return Err(PathDataError::UnexpectedToken {
                    position: i,
                    token: "}".to_string(),
                })
            }
            '-' | '+' => {
                // A sign after an exponent marker belongs to the number.
                let after_exponent = current
                    .is_some_and(|start| path_data[start..i].ends_with(['e', 'E']));
                if !after_exponent {
                    flush(path_data, &mut tokens, &mut current, i);
                    current = Some(i);
                }
            }
            '.' => {
                // A second decimal point starts the next number (`0.5.5`).
                if current.is_some_and(|start| path_data[start..i].contains(['.', 'e', 'E'])) {
                    flush(path_data, &mut tokens, &mut current, i);
                }
                current.get_or_insert(i);
            }
            _ => {
                current.get_or_insert(i);
            }
        }
    }
    flush(path_data, &mut tokens, &mut current, path_data.len());

    Ok(tokens)
}

/// A command as read from text, before relative conversion
struct RawCommand {
    command: PathCommand<Argument>,
    absolute: bool,
}

struct Parser<'a> {
    tokens: Vec<Spanned<'a>>,
    pos: usize,
    commands: Vec<RawCommand>,
}

impl<'a> Parser<'a> {
    fn new(path_data: &'a str) -> std::result::Result<Self, PathDataError> {
        Ok(Self {
            tokens: tokenize(path_data)?,
            pos: 0,
            commands: Vec::new(),
        })
    }

    fn run(mut self) -> Result<Vec<RawCommand>> {
        while let Some(spanned) = self.tokens.get(self.pos).copied() {
            self.pos += 1;
            let letter = match spanned.token {
                Token::Command(letter) => letter,
                Token::Number(text) | Token::Expression(text) => {
                    return Err(PathDataError::UnexpectedToken {
                        position: spanned.position,
                        token: text.to_string(),
                    }
                    .into());
                }
            };
            let Some((kind, absolute)) = CommandKind::from_letter(letter) else {
                return Err(PathDataError::UnexpectedToken {
                    position: spanned.position,
                    token: letter.to_string(),
                }
                .into());
            };
            if self.commands.is_empty() && kind != CommandKind::MoveTo {
                return Err(PathDataError::MissingInitialMove.into());
            }

            self.read_groups(kind, letter, absolute)?;
        }
        Ok(self.commands)
    }

    /// Read one argument group, then any implicit repetitions.
    fn read_groups(&mut self, kind: CommandKind, letter: char, absolute: bool) -> Result<()> {
        if kind == CommandKind::ClosePath {
            self.commands.push(RawCommand {
                command: PathCommand::ClosePath,
                absolute,
            });
            return Ok(());
        }

        let mut group_kind = kind;
        let mut group_letter = letter;
        loop {
            let args = self.read_args(group_kind, group_letter)?;
            let command = build_command(group_kind, args);
            self.commands.push(RawCommand { command, absolute });

            if !matches!(
                self.tokens.get(self.pos).map(|s| s.token),
                Some(Token::Number(_) | Token::Expression(_))
            ) {
                return Ok(());
            }
            // Extra pairs after a move are line-tos of the same case.
            if group_kind == CommandKind::MoveTo {
                group_kind = CommandKind::LineTo;
                group_letter = if absolute { 'L' } else { 'l' };
            }
        }
    }

    fn read_args(&mut self, kind: CommandKind, letter: char) -> Result<Vec<Slot>> {
        let expected = kind.arity();
        let index = self.commands.len();
        let mut args = Vec::with_capacity(expected);

        for slot in 0..expected {
            let missing = PathDataError::MissingArguments {
                letter,
                expected,
                found: slot,
            };
            let Some(&Spanned { token, position }) = self.tokens.get(self.pos) else {
                return Err(missing.into());
            };

            let is_flag = kind == CommandKind::EllipticalArc && (slot == 3 || slot == 4);
            let value = match token {
                Token::Command(_) => return Err(missing.into()),
                Token::Number(text) if is_flag => {
                    let flag = match text.as_bytes().first() {
                        Some(b'0') => false,
                        Some(b'1') => true,
                        _ => {
                            return Err(PathDataError::InvalidFlag {
                                position,
                                text: text.to_string(),
                            }
                            .into())
                        }
                    };
                    // Flags need no separator: "1010" is two flags and then 10.
                    if text.len() > 1 {
                        self.tokens[self.pos] = Spanned {
                            token: Token::Number(&text[1..]),
                            position: position + 1,
                        };
                        args.push(Slot::Flag(flag));
                        continue;
                    }
                    Slot::Flag(flag)
                }
                Token::Expression(text) if is_flag => {
                    return Err(PathDataError::InvalidFlag {
                        position,
                        text: text.to_string(),
                    }
                    .into())
                }
                Token::Number(text) => Slot::Value(Argument::Literal(parse_number(text, position)?)),
                Token::Expression(text) => {
                    let expr = Expression::parse(text).map_err(|err| {
                        TemplateError::TemplateCorruption {
                            index,
                            text: text.to_string(),
                            reason: err.to_string(),
                        }
                    })?;
                    Slot::Value(Argument::from(expr))
                }
            };
            self.pos += 1;
            args.push(value);
        }
        Ok(args)
    }
}

enum Slot {
    Value(Argument),
    Flag(bool),
}

fn parse_number(text: &str, position: usize) -> std::result::Result<f64, PathDataError> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PathDataError::InvalidNumber {
            position,
            text: text.to_string(),
        })
}

fn build_command(kind: CommandKind, slots: Vec<Slot>) -> PathCommand<Argument> {
    let mut values = Vec::with_capacity(slots.len());
    let mut flags = Vec::with_capacity(2);
    for slot in slots {
        match slot {
            Slot::Value(arg) => values.push(arg),
            Slot::Flag(flag) => flags.push(flag),
        }
    }
    let v = |i: usize| values[i];

    match kind {
        CommandKind::MoveTo => PathCommand::MoveTo { x: v(0), y: v(1) },
        CommandKind::LineTo => PathCommand::LineTo { x: v(0), y: v(1) },
        CommandKind::HorizontalLine => PathCommand::HorizontalLine { x: v(0) },
        CommandKind::VerticalLine => PathCommand::VerticalLine { y: v(0) },
        CommandKind::CubicCurve => PathCommand::CubicCurve {
            x1: v(0),
            y1: v(1),
            x2: v(2),
            y2: v(3),
            x: v(4),
            y: v(5),
        },
        CommandKind::SmoothCubicCurve => PathCommand::SmoothCubicCurve {
            x2: v(0),
            y2: v(1),
            x: v(2),
            y: v(3),
        },
        CommandKind::QuadraticCurve => PathCommand::QuadraticCurve {
            x1: v(0),
            y1: v(1),
            x: v(2),
            y: v(3),
        },
        CommandKind::SmoothQuadraticCurve => PathCommand::SmoothQuadraticCurve { x: v(0), y: v(1) },
        CommandKind::EllipticalArc => PathCommand::EllipticalArc {
            rx: v(0),
            ry: v(1),
            rotation: v(2),
            large_arc: flags[0],
            sweep: flags[1],
            x: v(3),
            y: v(4),
        },
        CommandKind::ClosePath => PathCommand::ClosePath,
    }
}

/// Parse literal path data into a relative contour.
///
/// Absolute commands are converted against the running current point; the
/// first move is relative to the origin.
pub fn parse_contour(path_data: &str) -> Result<Contour> {
    let raw = Parser::new(path_data)?.run()?;

    let mut current = point(0.0, 0.0);
    let mut subpath_start = current;
    let mut commands = Vec::with_capacity(raw.len());

    for (index, RawCommand { command, absolute }) in raw.into_iter().enumerate() {
        let literal = command.try_map(|arg| {
            arg.as_literal()
                .ok_or(PathDataError::ExpressionInLiteral { index })
        })?;
        let relative = if absolute {
            to_relative(&literal, current)
        } else {
            literal
        };

        match relative {
            PathCommand::ClosePath => current = subpath_start,
            _ => {
                if let Some((dx, dy)) = relative.delta() {
                    current = point(current.x + dx, current.y + dy);
                }
                if relative.kind() == CommandKind::MoveTo {
                    subpath_start = current;
                }
            }
        }
        commands.push(relative);
    }

    Ok(Contour::new(commands))
}

fn to_relative(command: &PathCommand<f64>, current: Point<f64>) -> PathCommand<f64> {
    let (cx, cy) = (current.x, current.y);
    match *command {
        PathCommand::MoveTo { x, y } => PathCommand::MoveTo { x: x - cx, y: y - cy },
        PathCommand::LineTo { x, y } => PathCommand::LineTo { x: x - cx, y: y - cy },
        PathCommand::HorizontalLine { x } => PathCommand::HorizontalLine { x: x - cx },
        PathCommand::VerticalLine { y } => PathCommand::VerticalLine { y: y - cy },
        PathCommand::CubicCurve {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        } => PathCommand::CubicCurve {
            x1: x1 - cx,
            y1: y1 - cy,
            x2: x2 - cx,
            y2: y2 - cy,
            x: x - cx,
            y: y - cy,
        },
        PathCommand::SmoothCubicCurve { x2, y2, x, y } => PathCommand::SmoothCubicCurve {
            x2: x2 - cx,
            y2: y2 - cy,
            x: x - cx,
            y: y - cy,
        },
        PathCommand::QuadraticCurve { x1, y1, x, y } => PathCommand::QuadraticCurve {
            x1: x1 - cx,
            y1: y1 - cy,
            x: x - cx,
            y: y - cy,
        },
        PathCommand::SmoothQuadraticCurve { x, y } => PathCommand::SmoothQuadraticCurve {
            x: x - cx,
            y: y - cy,
        },
        PathCommand::EllipticalArc {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            x,
            y,
        } => PathCommand::EllipticalArc {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            x: x - cx,
            y: y - cy,
        },
        PathCommand::ClosePath => PathCommand::ClosePath,
    }
}

/// Parse template text.
///
/// Commands must be relative, except an initial `M` and `Z`, which mean the
/// same as their relative forms there. Malformed expressions are reported
/// as [`TemplateError::TemplateCorruption`] naming the command index.
pub fn parse_template(path_data: &str) -> Result<Template> {
    let raw = Parser::new(path_data)?.run()?;
    let mut commands = Vec::with_capacity(raw.len());

    for (index, RawCommand { command, absolute }) in raw.into_iter().enumerate() {
        let allowed = !absolute
            || command.kind() == CommandKind::ClosePath
            || (index == 0 && command.kind() == CommandKind::MoveTo);
        if !allowed {
            return Err(PathDataError::AbsoluteInTemplate {
                index,
                letter: command.letter().to_ascii_uppercase(),
            }
            .into());
        }
        commands.push(command);
    }

    Ok(Contour::new(commands))
}

impl FromStr for Contour<f64> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_contour(s)
    }
}

impl FromStr for Contour<Argument> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_template(s)
    }
}
