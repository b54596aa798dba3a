//! Thickness expressions
//!
//! An [`Expression`] is the affine value `offset + factor * thickness`. It is
//! written into path data inside braces (`{thickness}`, `{-thickness}`,
//! `{2.5-0.5*thickness}`, ...) and read back with a small dedicated parser,
//! so a segment that has already been tagged can be corrected again without
//! losing its stored contribution.

use lasersvg_core::{canonicalize, format_number, round_to_precision, TemplateError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The only free variable an expression may reference.
pub const THICKNESS_VARIABLE: &str = "thickness";

/// Errors raised while reading a single expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Nothing between the braces
    #[error("empty expression")]
    Empty,

    /// Braces missing or mismatched
    #[error("unbalanced braces")]
    UnbalancedBraces,

    /// A character outside the grammar
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar {
        /// Byte offset inside the expression.
        position: usize,
        /// The offending character.
        ch: char,
    },

    /// A variable other than `thickness`
    #[error("unknown variable '{name}' at position {position}")]
    UnknownVariable {
        /// Byte offset inside the expression.
        position: usize,
        /// The variable name.
        name: String,
    },

    /// A numeric literal that does not parse
    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber {
        /// Byte offset inside the expression.
        position: usize,
        /// The literal text.
        text: String,
    },

    /// Input ended where a term was expected
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// The value overflowed to infinity or NaN
    #[error("expression value is not finite")]
    NonFinite,
}

/// Sign of the thickness term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Plus,
    Minus,
}

/// `offset + factor * thickness`, both parts kept in canonical form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    offset: f64,
    factor: f64,
}

impl Expression {
    pub fn new(offset: f64, factor: f64) -> Self {
        Self {
            offset: canonicalize(offset),
            factor: canonicalize(factor),
        }
    }

    /// A constant with no thickness term.
    pub fn literal(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// Exactly one thickness.
    pub fn thickness() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Express `value` as a multiple of `divisor` (the thickness it was
    /// drawn at): `factor = value / divisor`, no offset.
    pub fn from_ratio(value: f64, divisor: f64) -> Result<Self, TemplateError> {
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(TemplateError::InvalidThickness { value: divisor });
        }
        Ok(Self::new(0.0, value / divisor))
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn is_literal(&self) -> bool {
        self.factor == 0.0
    }

    /// Sign joining the thickness term, `None` without one.
    pub fn operator(&self) -> Option<Sign> {
        if self.factor > 0.0 {
            Some(Sign::Plus)
        } else if self.factor < 0.0 {
            Some(Sign::Minus)
        } else {
            None
        }
    }

    /// Add a further offset and factor contribution.
    pub fn combine(&self, delta_offset: f64, delta_factor: f64) -> Self {
        Self::new(self.offset + delta_offset, self.factor + delta_factor)
    }

    /// Value at a concrete thickness, rounded to the shared precision.
    pub fn evaluate(&self, thickness: f64) -> f64 {
        round_to_precision(self.offset + self.factor * thickness)
    }

    /// Read an expression, with or without its surrounding braces.
    pub fn parse(text: &str) -> Result<Self, ExpressionError> {
        let trimmed = text.trim();
        let inner = match (trimmed.strip_prefix('{'), trimmed.ends_with('}')) {
            (Some(rest), true) => &rest[..rest.len() - 1],
            (None, false) => trimmed,
            _ => return Err(ExpressionError::UnbalancedBraces),
        };
        if inner.contains(['{', '}']) {
            return Err(ExpressionError::UnbalancedBraces);
        }
        AffineParser::new(inner).parse()
    }
}

impl Default for Expression {
    fn default() -> Self {
        Self::literal(0.0)
    }
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(sign) = self.operator() else {
            return write!(f, "{}", format_number(self.offset));
        };
        let magnitude = self.factor.abs();
        let term = if magnitude == 1.0 {
            THICKNESS_VARIABLE.to_string()
        } else {
            format!("{}*{}", format_number(magnitude), THICKNESS_VARIABLE)
        };
        let op = match sign {
            Sign::Plus => "+",
            Sign::Minus => "-",
        };
        if self.offset == 0.0 {
            let lead = if sign == Sign::Minus { "-" } else { "" };
            write!(f, "{{{}{}}}", lead, term)
        } else {
            write!(f, "{{{}{}{}}}", format_number(self.offset), op, term)
        }
    }
}

/// Recursive-descent reader for sums of `number`, `thickness` and
/// `number*thickness` terms.
struct AffineParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> AffineParser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn parse(mut self) -> Result<Expression, ExpressionError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(ExpressionError::Empty);
        }

        let (mut offset, mut factor) = (0.0, 0.0);
        let mut sign = self.read_sign().unwrap_or(1.0);
        loop {
            let (value, is_thickness) = self.read_term()?;
            if is_thickness {
                factor += sign * value;
            } else {
                offset += sign * value;
            }

            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(ch) => {
                    sign = self.read_sign().ok_or(ExpressionError::UnexpectedChar {
                        position: self.pos,
                        ch,
                    })?;
                }
            }
        }

        if !offset.is_finite() || !factor.is_finite() {
            return Err(ExpressionError::NonFinite);
        }
        Ok(Expression::new(offset, factor))
    }

    fn read_sign(&mut self) -> Option<f64> {
        self.skip_whitespace();
        let sign = match self.peek()? {
            '+' => 1.0,
            '-' => -1.0,
            _ => return None,
        };
        self.pos += 1;
        Some(sign)
    }

    /// One term; the flag is set when it scales the thickness.
    fn read_term(&mut self) -> Result<(f64, bool), ExpressionError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ExpressionError::UnexpectedEnd),
            Some(ch) if ch.is_ascii_digit() || ch == '.' => {
                let value = self.read_number()?;
                self.skip_whitespace();
                if self.peek() == Some('*') {
                    self.pos += 1;
                    self.skip_whitespace();
                    self.read_variable()?;
                    Ok((value, true))
                } else {
                    Ok((value, false))
                }
            }
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.read_variable()?;
                self.skip_whitespace();
                if self.peek() == Some('*') {
                    self.pos += 1;
                    self.skip_whitespace();
                    Ok((self.read_number()?, true))
                } else {
                    Ok((1.0, true))
                }
            }
            Some(ch) => Err(ExpressionError::UnexpectedChar {
                position: self.pos,
                ch,
            }),
        }
    }

    fn read_number(&mut self) -> Result<f64, ExpressionError> {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        let mut end = start;
        while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
            end += 1;
        }
        // Exponent only when digits follow, so `2e` stays an error at `e`.
        if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut exp = end + 1;
            if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
                exp += 1;
            }
            if exp < bytes.len() && bytes[exp].is_ascii_digit() {
                while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                    exp += 1;
                }
                end = exp;
            }
        }

        if end == start {
            return match self.peek() {
                Some(ch) => Err(ExpressionError::UnexpectedChar {
                    position: start,
                    ch,
                }),
                None => Err(ExpressionError::UnexpectedEnd),
            };
        }

        let text = &self.text[start..end];
        self.pos = end;
        text.parse::<f64>()
            .map_err(|_| ExpressionError::InvalidNumber {
                position: start,
                text: text.to_string(),
            })
    }

    fn read_variable(&mut self) -> Result<(), ExpressionError> {
        let start = self.pos;
        let rest = &self.text[start..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return match self.peek() {
                Some(ch) => Err(ExpressionError::UnexpectedChar {
                    position: start,
                    ch,
                }),
                None => Err(ExpressionError::UnexpectedEnd),
            };
        }

        let name = &rest[..len];
        if name != THICKNESS_VARIABLE {
            return Err(ExpressionError::UnknownVariable {
                position: start,
                name: name.to_string(),
            });
        }
        self.pos += len;
        Ok(())
    }
}

/// A template argument: a literal number or a thickness expression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Literal(f64),
    Expr(Expression),
}

impl Argument {
    pub fn evaluate(&self, thickness: f64) -> f64 {
        match self {
            Self::Literal(value) => *value,
            Self::Expr(expr) => expr.evaluate(thickness),
        }
    }

    /// The argument as an expression; literals get a zero factor.
    pub fn as_expression(&self) -> Expression {
        match self {
            Self::Literal(value) => Expression::literal(*value),
            Self::Expr(expr) => *expr,
        }
    }

    pub fn is_parametric(&self) -> bool {
        matches!(self, Self::Expr(_))
    }

    pub fn as_literal(&self) -> Option<f64> {
        match self {
            Self::Literal(value) => Some(*value),
            Self::Expr(_) => None,
        }
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Self::Literal(value)
    }
}

impl From<Expression> for Argument {
    fn from(expr: Expression) -> Self {
        if expr.is_literal() {
            Self::Literal(expr.offset())
        } else {
            Self::Expr(expr)
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", format_number(*value)),
            Self::Expr(expr) => write!(f, "{}", expr),
        }
    }
}
